//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                                      - Welcome text
//!
//! # Customers
//! POST   /customer                              - Create customer
//! GET    /customers                             - List customers (nested orders)
//! GET    /customer/{id}                         - Get one customer
//! PUT    /customer/{id}                         - Partial update
//! DELETE /customers/{id}                        - Delete customer
//!
//! # Products
//! POST   /products                              - Create product
//! GET    /products                              - List products
//! GET    /product/{id}                          - Get one product
//! DELETE /product/{id}                          - Delete product
//!
//! # Cart
//! GET    /customer/{id}/cart                    - Get the open order
//! POST   /customers/{id}/orders                 - Add product, body {product_id}
//! DELETE /customers/{id}/orders/{product_id}    - Remove product
//!
//! # Accounts
//! POST   /customer/{id}/account                 - Create account
//! GET    /customer/{id}/account                 - Get account
//! DELETE /customer/{id}/account                 - Delete account
//! ```
//!
//! The singular/plural split (`/customer` vs `/customers`) is part of the
//! published API contract and is kept as-is.

pub mod accounts;
pub mod cart;
pub mod customers;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Welcome text for the API root.
pub async fn home() -> &'static str {
    "welcome to the bodega store api"
}

/// Create the customer routes.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customer", post(customers::create))
        .route("/customers", get(customers::list))
        .route(
            "/customer/{id}",
            get(customers::show).put(customers::update),
        )
        .route("/customers/{id}", delete(customers::destroy))
}

/// Create the product routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::create).get(products::list))
        .route(
            "/product/{id}",
            get(products::show).delete(products::destroy),
        )
}

/// Create the cart routes.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/{id}/cart", get(cart::show))
        .route("/customers/{id}/orders", post(cart::add_product))
        .route(
            "/customers/{id}/orders/{product_id}",
            delete(cart::remove_product),
        )
}

/// Create the account routes.
pub fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/customer/{id}/account",
        post(accounts::create)
            .get(accounts::show)
            .delete(accounts::destroy),
    )
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .merge(customer_routes())
        .merge(product_routes())
        .merge(cart_routes())
        .merge(account_routes())
}
