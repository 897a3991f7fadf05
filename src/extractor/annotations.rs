use syn::visit::Visit;
use syn::{Attribute, Expr, ExprCall, ItemFn};

/// Outcome of scanning one function's annotations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnnotationScan {
    /// Whether the body contains a `validate_http_method(..)` call
    pub eligible: bool,
    /// Model name bound via `#[validate_request(..)]`, if any
    pub model: Option<String>,
}

/// Parses one function's source text and inspects its annotations.
///
/// Two independent questions are answered:
///
/// 1. **Eligibility** — is there a call expression invoking
///    `validate_http_method` anywhere in the function?
/// 2. **Model binding** — does a `#[validate_request(Model)]` attribute name a
///    request model? A plain identifier is returned as-is; a multi-segment
///    path is returned with its segments joined by `.`.
///
/// The walk descends into nested function definitions and keeps the first
/// matching attribute it encounters, without distinguishing the target
/// function from helpers defined inside it. This is a known precision limit
/// carried over from the original detection scheme.
///
/// # Errors
///
/// Returns the underlying `syn` error when the text does not parse as a
/// function item.
pub fn scan_function(source: &str) -> syn::Result<AnnotationScan> {
    let item: ItemFn = syn::parse_str(source)?;

    let mut visitor = AnnotationVisitor::default();
    visitor.visit_item_fn(&item);

    Ok(AnnotationScan {
        eligible: visitor.eligible,
        model: visitor.model,
    })
}

#[derive(Default)]
struct AnnotationVisitor {
    eligible: bool,
    model: Option<String>,
}

impl<'ast> Visit<'ast> for AnnotationVisitor {
    fn visit_expr_call(&mut self, node: &'ast ExprCall) {
        if let Expr::Path(path_expr) = &*node.func {
            let is_marker = path_expr
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "validate_http_method");
            if is_marker {
                self.eligible = true;
            }
        }

        syn::visit::visit_expr_call(self, node);
    }

    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        // First binding found across all nested function definitions wins
        if self.model.is_none() {
            self.model = model_from_attrs(&node.attrs);
        }

        syn::visit::visit_item_fn(self, node);
    }
}

/// Recovers the model name from a `#[validate_request(..)]` attribute.
fn model_from_attrs(attrs: &[Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("validate_request") {
            continue;
        }

        if let Ok(Expr::Path(path_expr)) = attr.parse_args::<Expr>() {
            let segments: Vec<String> = path_expr
                .path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect();
            return Some(segments.join("."));
        }
    }

    None
}
