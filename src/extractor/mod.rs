//! Endpoint extraction from handler functions.
//!
//! A function becomes an endpoint only when it carries the eligibility
//! marker: a call to the `validate_http_method` helper somewhere in its body.
//! For eligible functions the extractor recovers the HTTP method, query
//! parameters and optional request-body model, producing one
//! [`EndpointDescriptor`] per function.
//!
//! The work is split across two submodules:
//!
//! - [`annotations`] answers the structural questions (eligibility marker,
//!   `#[validate_request(..)]` model binding) by walking the syntax tree.
//! - [`classifier`] applies the textual method heuristic and derives query
//!   parameters from the function signature.

pub mod annotations;
pub mod classifier;

use crate::error::{Error, Result};
use crate::parser::LoadedModule;
use crate::schema_resolver::{Schema, SchemaResolver};
use log::debug;
use quote::ToTokens;
use serde::Serialize;

/// HTTP methods recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Fixed priority order used by method inference.
    pub const PRIORITY: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    /// Upper-case token searched for in the function source.
    pub fn token(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Lower-case form used as the key in the paths mapping.
    pub fn lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// Whether the method conventionally carries a request body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    /// Whether parameters are passed via the query string instead of a body.
    pub fn query_only(&self) -> bool {
        matches!(
            self,
            HttpMethod::Get | HttpMethod::Delete | HttpMethod::Options | HttpMethod::Head
        )
    }
}

/// One required, string-typed query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub schema: ParameterType,
}

/// Parameter type wrapper; no type inference is performed, everything is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterType {
    #[serde(rename = "type")]
    pub param_type: String,
}

impl ParameterSpec {
    /// Creates a required string query parameter.
    pub fn query(name: String) -> Self {
        Self {
            name,
            location: "query".to_string(),
            required: true,
            schema: ParameterType {
                param_type: "string".to_string(),
            },
        }
    }
}

/// Everything known about one discovered endpoint.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Lower-cased path `/api/method/<app>.api.<module>.<function>`
    pub path: String,
    /// Effective HTTP method
    pub method: HttpMethod,
    /// Module the handler was declared in (used as the tag)
    pub module: String,
    /// Handler function name
    pub function: String,
    /// Query parameters, in declaration order
    pub parameters: Vec<ParameterSpec>,
    /// Resolved request-body schema, for body methods with a model binding
    pub request_schema: Option<Schema>,
}

/// Extracts an endpoint descriptor from one handler function.
///
/// Returns `Ok(None)` for functions that lack the eligibility marker.
///
/// # Errors
///
/// Returns [`Error::Scan`] when the function's source cannot be re-parsed.
/// Callers record the error and continue with the module's other functions.
pub fn extract(
    app: &str,
    module: &LoadedModule,
    function: &syn::ItemFn,
) -> Result<Option<EndpointDescriptor>> {
    let function_name = function.sig.ident.to_string();
    let source = function.to_token_stream().to_string();

    let scan = annotations::scan_function(&source).map_err(|e| Error::Scan {
        module: module.module_name.clone(),
        function: function_name.clone(),
        message: e.to_string(),
    })?;

    if !scan.eligible {
        debug!(
            "Skipping {}: 'validate_http_method' not found",
            function_name
        );
        return Ok(None);
    }

    let (method, parameters) = classifier::classify(&source, &function.sig);

    let request_schema = match &scan.model {
        Some(model) if method.carries_body() => SchemaResolver::resolve(model, module),
        _ => None,
    };

    let path = classifier::endpoint_path(app, &module.module_name, &function_name);

    Ok(Some(EndpointDescriptor {
        path,
        method,
        module: module.module_name.clone(),
        function: function_name,
        parameters,
        request_schema,
    }))
}
