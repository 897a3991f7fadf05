use super::{HttpMethod, ParameterSpec};

/// Marker substring for variadic-keyword capture; parameters carrying it are
/// never surfaced as query parameters.
const KWARGS_MARKER: &str = "kwargs";

/// Classifies one handler: effective HTTP method plus query parameters.
///
/// Method inference is a deliberate textual heuristic: the function's source
/// is searched for the method tokens in a fixed priority order and the first
/// token present anywhere in the text wins, defaulting to POST. A token
/// inside a comment, string literal or unrelated identifier will therefore
/// misfire. The heuristic is isolated behind this function so a structural
/// matcher can replace it without touching the rest of the pipeline.
///
/// Query parameters are derived only for methods that carry no body.
pub fn classify(source: &str, signature: &syn::Signature) -> (HttpMethod, Vec<ParameterSpec>) {
    let method = infer_method(source);

    let parameters = if method.query_only() {
        query_parameters(signature)
    } else {
        Vec::new()
    };

    (method, parameters)
}

/// Scans the source text for the first method token in priority order.
pub fn infer_method(source: &str) -> HttpMethod {
    for method in HttpMethod::PRIORITY {
        if source.contains(method.token()) {
            return method;
        }
    }

    HttpMethod::Post
}

/// Builds the endpoint path: `/api/method/<app>.api.<module>.<function>`,
/// entirely lower-cased.
pub fn endpoint_path(app: &str, module: &str, function: &str) -> String {
    format!("/api/method/{}.api.{}.{}", app, module, function).to_lowercase()
}

/// Derives required string query parameters from the formal parameter list,
/// in declaration order. Parameters with a default (an `Option<..>` type) or
/// the variadic-keyword marker in their name are excluded, as are receivers
/// and destructuring patterns.
fn query_parameters(signature: &syn::Signature) -> Vec<ParameterSpec> {
    signature
        .inputs
        .iter()
        .filter_map(|input| {
            let syn::FnArg::Typed(pat_type) = input else {
                return None;
            };
            let syn::Pat::Ident(pat_ident) = &*pat_type.pat else {
                return None;
            };

            let name = pat_ident.ident.to_string();
            if name.contains(KWARGS_MARKER) {
                return None;
            }
            if has_default(&pat_type.ty) {
                return None;
            }

            Some(ParameterSpec::query(name))
        })
        .collect()
}

/// An `Option<..>`-typed parameter counts as having a default value.
fn has_default(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };

    type_path
        .path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Option")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn signature(code: &str) -> syn::Signature {
        syn::parse_str::<syn::ItemFn>(code).unwrap().sig
    }

    #[test]
    fn test_infer_method_from_marker_argument() {
        assert_eq!(
            infer_method(r#"fn f() { validate_http_method("DELETE"); }"#),
            HttpMethod::Delete
        );
    }

    #[test]
    fn test_infer_method_defaults_to_post() {
        assert_eq!(infer_method("fn f() { let x = 1; }"), HttpMethod::Post);
    }

    #[test]
    fn test_priority_order_decides_between_tokens() {
        // GET is checked before POST regardless of textual position
        let source = r#"fn f() { do_post("POST"); validate_http_method("GET"); }"#;
        assert_eq!(infer_method(source), HttpMethod::Get);
    }

    #[test]
    fn test_lower_case_tokens_do_not_match() {
        assert_eq!(infer_method("fn forget_delete() {}"), HttpMethod::Post);
    }

    #[test]
    fn test_classify_derives_parameters_for_get() {
        let sig = signature("fn get_invoice(invoice_id: String, customer: String) {}");
        let (method, params) = classify(r#"fn f() { validate_http_method("GET"); }"#, &sig);

        assert_eq!(method, HttpMethod::Get);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["invoice_id", "customer"]);
        assert!(params.iter().all(|p| p.required));
        assert!(params.iter().all(|p| p.location == "query"));
        assert!(params.iter().all(|p| p.schema.param_type == "string"));
    }

    #[test]
    fn test_classify_skips_parameters_for_post() {
        let sig = signature("fn create_order(payload: OrderModel) {}");
        let (method, params) = classify(r#"fn f() { validate_http_method("POST"); }"#, &sig);

        assert_eq!(method, HttpMethod::Post);
        assert!(params.is_empty());
    }

    #[test]
    fn test_optional_parameters_are_excluded() {
        let sig = signature("fn list(status: String, limit: Option<u32>) {}");
        let (_, params) = classify(r#"fn f() { validate_http_method("GET"); }"#, &sig);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["status"]);
    }

    #[test]
    fn test_kwargs_marker_is_excluded() {
        let sig = signature("fn list(status: String, extra_kwargs: Map) {}");
        let (_, params) = classify(r#"fn f() { validate_http_method("DELETE"); }"#, &sig);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["status"]);
    }

    #[test]
    fn test_receiver_is_excluded() {
        let sig = signature("fn list(&self, status: String) {}");
        let (_, params) = classify(r#"fn f() { validate_http_method("HEAD"); }"#, &sig);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "status");
    }

    #[test]
    fn test_endpoint_path_format() {
        assert_eq!(
            endpoint_path("shop", "billing", "get_invoice"),
            "/api/method/shop.api.billing.get_invoice"
        );
    }

    #[test]
    fn test_endpoint_path_is_lower_cased() {
        assert_eq!(
            endpoint_path("CRM", "Reports", "Get_Summary"),
            "/api/method/crm.api.reports.get_summary"
        );
    }
}
