//! Order endpoints.

use serde::Deserialize;

#[derive(Deserialize)]
pub struct OrderModel {
    pub sku: String,
    pub qty: i64,
}

#[validate_request(OrderModel)]
pub fn create_order(payload: OrderModel) -> String {
    validate_http_method("POST");
    payload.sku
}

#[validate_request(OrderModel)]
pub fn amend_order(payload: OrderModel) -> String {
    validate_http_method("PATCH");
    payload.sku
}
