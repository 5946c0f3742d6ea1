//! Integration tests for the storefront API.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p bodega-cli -- migrate)
//! - The API server running (cargo run -p bodega-api)
//!
//! Run with: cargo test -p bodega-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("BODEGA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::new()
}

/// Test helper: Create a customer and return its record.
async fn create_customer(client: &Client, name: &str) -> Value {
    let resp = client
        .post(format!("{}/customer", base_url()))
        .json(&json!({
            "name": name,
            "age": 30,
            "email": format!("{}@example.com", Uuid::new_v4()),
        }))
        .send()
        .await
        .expect("Failed to create customer");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse customer")
}

/// Test helper: Create a product and return its record.
async fn create_product(client: &Client, name: &str, price: f64) -> Value {
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({ "name": name, "price": price }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse product")
}

fn id_of(record: &Value) -> i64 {
    record["id"].as_i64().expect("record has an integer id")
}

// ============================================================================
// Health & Welcome
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_health_and_welcome() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to get health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("Failed to get welcome");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read welcome body");
    assert!(body.contains("store"));
}

// ============================================================================
// Customers
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_customer_round_trip() {
    let client = client();
    let created = create_customer(&client, "Ann").await;
    let id = id_of(&created);

    let resp = client
        .get(format!("{}/customer/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get customer");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = resp.json().await.expect("Failed to parse customer");
    assert_eq!(fetched["name"], created["name"]);
    assert_eq!(fetched["age"], created["age"]);
    assert_eq!(fetched["email"], created["email"]);
    assert_eq!(fetched["orders"], json!([]));
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_create_customer_missing_fields_are_keyed() {
    let client = client();

    let resp = client
        .post(format!("{}/customer", base_url()))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to post customer");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let errors: Value = resp.json().await.expect("Failed to parse errors");
    assert!(errors.get("name").is_some());
    assert!(errors.get("age").is_some());
    assert!(errors.get("email").is_some());
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_unknown_ids_are_404_never_500() {
    let client = client();

    let resp = client
        .get(format!("{}/customer/999999999", base_url()))
        .send()
        .await
        .expect("Failed to get customer");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/product/999999999", base_url()))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/customer/999999999/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_partial_update_overwrites_only_supplied_fields() {
    let client = client();
    let created = create_customer(&client, "Ann").await;
    let id = id_of(&created);

    let resp = client
        .put(format!("{}/customer/{id}", base_url()))
        .json(&json!({ "name": "Ann W." }))
        .send()
        .await
        .expect("Failed to update customer");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Failed to parse customer");
    assert_eq!(updated["name"], "Ann W.");
    assert_eq!(updated["age"], created["age"]);
    assert_eq!(updated["email"], created["email"]);
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_update_rejects_malformed_supplied_field() {
    let client = client();
    let created = create_customer(&client, "Ann").await;
    let id = id_of(&created);

    let resp = client
        .put(format!("{}/customer/{id}", base_url()))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to update customer");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let errors: Value = resp.json().await.expect("Failed to parse errors");
    assert!(errors.get("email").is_some());
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_delete_customer_then_gone() {
    let client = client();
    let created = create_customer(&client, "Ann").await;
    let id = id_of(&created);

    let resp = client
        .delete(format!("{}/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/customer/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get customer");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again reports the missing row
    let resp = client
        .delete(format!("{}/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_product_crud() {
    let client = client();
    let created = create_product(&client, "Mug", 9.99).await;
    let id = id_of(&created);
    assert_eq!(created["price"], json!(9.99));

    let resp = client
        .get(format!("{}/product/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(fetched["name"], "Mug");
    assert_eq!(fetched["price"], json!(9.99));

    let resp = client
        .delete(format!("{}/product/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/product/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_create_product_rejects_negative_price() {
    let client = client();

    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({ "name": "Mug", "price": -9.99 }))
        .send()
        .await
        .expect("Failed to post product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let errors: Value = resp.json().await.expect("Failed to parse errors");
    assert!(errors.get("price").is_some());
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_cart_add_fetch_duplicate_and_remove() {
    let client = client();
    let customer = create_customer(&client, "Ann").await;
    let customer_id = id_of(&customer);
    let mug = create_product(&client, "Mug", 9.99).await;
    let mug_id = id_of(&mug);

    // An existing customer with no orders has an empty cart, not a 404
    let resp = client
        .get(format!("{}/customer/{customer_id}/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(body["message"], "Cart is empty");

    // First add creates the order and links the product
    let resp = client
        .post(format!("{}/customers/{customer_id}/orders", base_url()))
        .json(&json!({ "product_id": mug_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    let products = order["products"].as_array().expect("order has products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Mug");

    // Second add of the same product is rejected
    let resp = client
        .post(format!("{}/customers/{customer_id}/orders", base_url()))
        .json(&json!({ "product_id": mug_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["message"], "Product already in cart");

    // ... and the cart still holds exactly one product
    let resp = client
        .get(format!("{}/customer/{customer_id}/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["products"].as_array().expect("products").len(), 1);

    // Remove unlinks the product
    let resp = client
        .delete(format!(
            "{}/customers/{customer_id}/orders/{mug_id}",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to remove from cart");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Removing it again leaves the (now empty) cart unchanged
    let resp = client
        .delete(format!(
            "{}/customers/{customer_id}/orders/{mug_id}",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to remove from cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/customer/{customer_id}/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["products"].as_array().expect("products").len(), 0);
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_remove_without_open_order_is_404() {
    let client = client();
    let customer = create_customer(&client, "Ann").await;
    let customer_id = id_of(&customer);
    let mug = create_product(&client, "Mug", 9.99).await;
    let mug_id = id_of(&mug);

    let resp = client
        .delete(format!(
            "{}/customers/{customer_id}/orders/{mug_id}",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to remove from cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["message"], "No open order");
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_add_to_cart_with_unknown_ids_is_404() {
    let client = client();
    let mug = create_product(&client, "Mug", 9.99).await;
    let mug_id = id_of(&mug);

    let resp = client
        .post(format!("{}/customers/999999999/orders", base_url()))
        .json(&json!({ "product_id": mug_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let customer = create_customer(&client, "Ann").await;
    let customer_id = id_of(&customer);

    let resp = client
        .post(format!("{}/customers/{customer_id}/orders", base_url()))
        .json(&json!({ "product_id": 999999999 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_customer_list_nests_orders_and_products() {
    let client = client();
    let customer = create_customer(&client, "Ann").await;
    let customer_id = id_of(&customer);
    let mug = create_product(&client, "Mug", 9.99).await;

    let resp = client
        .post(format!("{}/customers/{customer_id}/orders", base_url()))
        .json(&json!({ "product_id": id_of(&mug) }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/customers", base_url()))
        .send()
        .await
        .expect("Failed to list customers");
    assert_eq!(resp.status(), StatusCode::OK);

    let customers: Vec<Value> = resp.json().await.expect("Failed to parse customers");
    let ann = customers
        .iter()
        .find(|c| c["id"].as_i64() == Some(customer_id))
        .expect("created customer is listed");

    let orders = ann["orders"].as_array().expect("customer has orders");
    assert_eq!(orders.len(), 1);
    let products = orders[0]["products"].as_array().expect("order has products");
    assert_eq!(products[0]["name"], "Mug");
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running bodega-api server and migrated database"]
async fn test_account_lifecycle() {
    let client = client();
    let customer = create_customer(&client, "Ann").await;
    let customer_id = id_of(&customer);
    let username = format!("u{}", &Uuid::new_v4().simple().to_string()[..12]);

    // Create
    let resp = client
        .post(format!("{}/customer/{customer_id}/account", base_url()))
        .json(&json!({ "username": username, "password": "correct horse battery" }))
        .send()
        .await
        .expect("Failed to create account");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let account: Value = resp.json().await.expect("Failed to parse account");
    assert_eq!(account["username"], json!(username));
    // The credential never appears in a payload
    assert!(account.get("password").is_none());
    assert!(account.get("password_hash").is_none());

    // A second account for the same customer is rejected
    let resp = client
        .post(format!("{}/customer/{customer_id}/account", base_url()))
        .json(&json!({ "username": format!("{username}2"), "password": "correct horse battery" }))
        .send()
        .await
        .expect("Failed to create account");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // A duplicate username on another customer is rejected
    let other = create_customer(&client, "Ben").await;
    let resp = client
        .post(format!("{}/customer/{}/account", base_url(), id_of(&other)))
        .json(&json!({ "username": username, "password": "correct horse battery" }))
        .send()
        .await
        .expect("Failed to create account");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Get
    let resp = client
        .get(format!("{}/customer/{customer_id}/account", base_url()))
        .send()
        .await
        .expect("Failed to get account");
    assert_eq!(resp.status(), StatusCode::OK);

    // Delete, then gone
    let resp = client
        .delete(format!("{}/customer/{customer_id}/account", base_url()))
        .send()
        .await
        .expect("Failed to delete account");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/customer/{customer_id}/account", base_url()))
        .send()
        .await
        .expect("Failed to get account");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
