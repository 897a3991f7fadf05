use crate::config::GeneratorConfig;
use crate::extractor::{EndpointDescriptor, ParameterSpec};
use crate::schema_resolver::Schema;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Swagger document builder.
///
/// Owns the [`SwaggerDocument`] for the duration of one generation run:
/// security schemes are populated once from the configuration at
/// construction, endpoint descriptors are merged in via [`upsert`], and
/// [`build`] hands back the finished document.
///
/// [`upsert`]: SwaggerBuilder::upsert
/// [`build`]: SwaggerBuilder::build
pub struct SwaggerBuilder {
    document: SwaggerDocument,
}

/// Swagger Info object
#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// One security-scheme declaration under `components.securitySchemes`
#[derive(Debug, Clone, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub scheme: String,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

/// A security requirement: scheme name -> scopes (always empty here)
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Swagger Components object
#[derive(Debug, Clone, Serialize)]
pub struct Components {
    #[serde(rename = "securitySchemes", skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<BTreeMap<String, SecurityScheme>>,
}

/// Media type wrapper for request bodies and responses
#[derive(Debug, Clone, Serialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// Swagger RequestBody object
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub description: String,
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

/// Swagger Response object
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub description: String,
    pub content: BTreeMap<String, MediaType>,
}

/// One operation under a path
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub summary: String,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterSpec>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, Response>,
    pub security: Vec<SecurityRequirement>,
}

/// Complete Swagger document
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerDocument {
    pub openapi: String,
    pub info: Info,
    /// path -> lower-case method -> operation
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    pub components: Components,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

impl SwaggerBuilder {
    /// Creates a builder with security metadata read once from the config.
    ///
    /// When no scheme is enabled, `components.securitySchemes` and the
    /// top-level `security` list are omitted entirely rather than emitted
    /// empty.
    pub fn new(config: &GeneratorConfig) -> Self {
        debug!("Initializing SwaggerBuilder");

        let mut schemes = BTreeMap::new();
        let mut global_security = Vec::new();

        if config.basic_auth {
            schemes.insert(
                "basicAuth".to_string(),
                SecurityScheme {
                    scheme_type: "http".to_string(),
                    scheme: "basic".to_string(),
                    bearer_format: None,
                },
            );
            global_security.push(requirement("basicAuth"));
        }

        if config.bearer_auth {
            schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme {
                    scheme_type: "http".to_string(),
                    scheme: "bearer".to_string(),
                    bearer_format: Some("JWT".to_string()),
                },
            );
            global_security.push(requirement("bearerAuth"));
        }

        let (components, security) = if schemes.is_empty() {
            (
                Components {
                    security_schemes: None,
                },
                None,
            )
        } else {
            (
                Components {
                    security_schemes: Some(schemes),
                },
                Some(global_security),
            )
        };

        Self {
            document: SwaggerDocument {
                openapi: "3.0.0".to_string(),
                info: Info {
                    title: format!("{} API", config.app_name),
                    version: "1.0.0".to_string(),
                },
                paths: BTreeMap::new(),
                components,
                security,
            },
        }
    }

    /// Inserts or overwrites the operation at `paths[path][method]`.
    ///
    /// Last write wins: a later descriptor for the same (path, method) pair
    /// silently replaces the earlier one. No merge, no conflict error.
    pub fn upsert(&mut self, descriptor: EndpointDescriptor) {
        debug!(
            "Upserting endpoint: {} {}",
            descriptor.method.token(),
            descriptor.path
        );

        let path = descriptor.path.clone();
        let method = descriptor.method.lower().to_string();
        let operation = Self::operation(descriptor);

        self.document
            .paths
            .entry(path)
            .or_default()
            .insert(method, operation);
    }

    fn operation(descriptor: EndpointDescriptor) -> Operation {
        let request_body = descriptor.request_schema.map(|schema| RequestBody {
            description: "Request body".to_string(),
            required: true,
            content: json_content(schema),
        });

        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "Successful response".to_string(),
                content: json_content(Schema::untyped_object()),
            },
        );

        Operation {
            summary: summary_for(&descriptor.function),
            tags: vec![descriptor.module],
            parameters: descriptor.parameters,
            request_body,
            responses,
            security: vec![requirement("basicAuth")],
        }
    }

    /// Builds the final document.
    pub fn build(self) -> SwaggerDocument {
        debug!(
            "Building Swagger document with {} paths",
            self.document.paths.len()
        );
        self.document
    }
}

fn json_content(schema: Schema) -> BTreeMap<String, MediaType> {
    let mut content = BTreeMap::new();
    content.insert("application/json".to_string(), MediaType { schema });
    content
}

fn requirement(scheme: &str) -> SecurityRequirement {
    let mut req = BTreeMap::new();
    req.insert(scheme.to_string(), Vec::new());
    req
}

/// Human-readable label derived from the function name:
/// `get_invoice` -> `Get Invoice`.
fn summary_for(function: &str) -> String {
    function
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::HttpMethod;
    use pretty_assertions::assert_eq;

    fn config(basic_auth: bool, bearer_auth: bool) -> GeneratorConfig {
        GeneratorConfig {
            app_name: "Test".to_string(),
            basic_auth,
            bearer_auth,
            bench_root: std::path::PathBuf::from("/bench"),
            apps: vec![],
            tool_app: "swagger".to_string(),
        }
    }

    fn descriptor(path: &str, method: HttpMethod, function: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            path: path.to_string(),
            method,
            module: "billing".to_string(),
            function: function.to_string(),
            parameters: vec![],
            request_schema: None,
        }
    }

    #[test]
    fn test_new_builder_document_shape() {
        let builder = SwaggerBuilder::new(&config(false, false));
        let document = builder.build();

        assert_eq!(document.openapi, "3.0.0");
        assert_eq!(document.info.title, "Test API");
        assert_eq!(document.info.version, "1.0.0");
        assert!(document.paths.is_empty());
    }

    #[test]
    fn test_security_omitted_when_disabled() {
        let document = SwaggerBuilder::new(&config(false, false)).build();

        assert!(document.components.security_schemes.is_none());
        assert!(document.security.is_none());
    }

    #[test]
    fn test_both_schemes_in_declared_order() {
        let document = SwaggerBuilder::new(&config(true, true)).build();

        let schemes = document.components.security_schemes.unwrap();
        let names: Vec<&String> = schemes.keys().collect();
        assert_eq!(names, vec!["basicAuth", "bearerAuth"]);

        assert_eq!(schemes["basicAuth"].scheme, "basic");
        assert_eq!(schemes["bearerAuth"].scheme, "bearer");
        assert_eq!(
            schemes["bearerAuth"].bearer_format,
            Some("JWT".to_string())
        );

        let security = document.security.unwrap();
        assert_eq!(security.len(), 2);
        assert!(security[0].contains_key("basicAuth"));
        assert!(security[1].contains_key("bearerAuth"));
    }

    #[test]
    fn test_bearer_only() {
        let document = SwaggerBuilder::new(&config(false, true)).build();

        let schemes = document.components.security_schemes.unwrap();
        assert_eq!(schemes.len(), 1);
        assert!(schemes.contains_key("bearerAuth"));
    }

    #[test]
    fn test_upsert_inserts_operation() {
        let mut builder = SwaggerBuilder::new(&config(false, false));
        builder.upsert(descriptor(
            "/api/method/shop.api.billing.get_invoice",
            HttpMethod::Get,
            "get_invoice",
        ));

        let document = builder.build();
        let methods = &document.paths["/api/method/shop.api.billing.get_invoice"];

        assert_eq!(methods.len(), 1);
        let operation = &methods["get"];
        assert_eq!(operation.summary, "Get Invoice");
        assert_eq!(operation.tags, vec!["billing"]);
        assert!(operation.request_body.is_none());
        assert!(operation.responses.contains_key("200"));
    }

    #[test]
    fn test_upsert_same_path_different_methods() {
        let mut builder = SwaggerBuilder::new(&config(false, false));
        builder.upsert(descriptor("/api/method/a", HttpMethod::Get, "list_all"));
        builder.upsert(descriptor("/api/method/a", HttpMethod::Post, "create_one"));

        let document = builder.build();
        let methods = &document.paths["/api/method/a"];

        assert_eq!(methods.len(), 2);
        assert_eq!(methods["get"].summary, "List All");
        assert_eq!(methods["post"].summary, "Create One");
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let mut builder = SwaggerBuilder::new(&config(false, false));
        builder.upsert(descriptor("/api/method/a", HttpMethod::Get, "first_version"));
        builder.upsert(descriptor("/api/method/a", HttpMethod::Get, "second_version"));

        let document = builder.build();
        let methods = &document.paths["/api/method/a"];

        assert_eq!(methods.len(), 1);
        assert_eq!(methods["get"].summary, "Second Version");
    }

    #[test]
    fn test_operation_carries_basic_auth_requirement() {
        let mut builder = SwaggerBuilder::new(&config(false, false));
        builder.upsert(descriptor("/api/method/a", HttpMethod::Get, "get_one"));

        let document = builder.build();
        let operation = &document.paths["/api/method/a"]["get"];

        assert_eq!(operation.security.len(), 1);
        assert_eq!(operation.security[0]["basicAuth"], Vec::<String>::new());
    }

    #[test]
    fn test_request_body_wrapping() {
        let mut builder = SwaggerBuilder::new(&config(false, false));
        let mut desc = descriptor("/api/method/a", HttpMethod::Post, "create_order");
        desc.request_schema = Some(Schema::untyped_object());
        builder.upsert(desc);

        let document = builder.build();
        let operation = &document.paths["/api/method/a"]["post"];
        let body = operation.request_body.as_ref().unwrap();

        assert!(body.required);
        assert_eq!(body.description, "Request body");
        assert!(body.content.contains_key("application/json"));
    }

    #[test]
    fn test_summary_formatting() {
        assert_eq!(summary_for("get_invoice"), "Get Invoice");
        assert_eq!(summary_for("create"), "Create");
        assert_eq!(summary_for("get_invoice_by_id"), "Get Invoice By Id");
    }
}
