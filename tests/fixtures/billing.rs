//! Invoice endpoints.

pub fn get_invoice(invoice_id: String) -> String {
    validate_http_method("GET");
    format!("invoice {}", invoice_id)
}

pub fn cancel_invoice(invoice_id: String, reason: Option<String>, extra_kwargs: Map) -> String {
    validate_http_method("DELETE");
    invoice_id
}

pub fn internal_helper() -> u32 {
    42
}
