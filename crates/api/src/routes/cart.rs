//! Cart handlers: the customer's open order and its product associations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use bodega_core::{CustomerId, ProductId};

use crate::db::{CustomerRepository, OrderRepository, ProductRepository, RepositoryError};
use crate::error::{ApiJson, AppError, Result, ValidationErrors};
use crate::models::order::OrderWithProducts;
use crate::state::AppState;

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    product_id: Option<i64>,
}

impl AddToCartRequest {
    fn validate(self) -> Result<ProductId> {
        match self.product_id.map(i32::try_from) {
            Some(Ok(id)) => Ok(ProductId::new(id)),
            Some(Err(_)) => {
                let mut errors = ValidationErrors::default();
                errors.add("product_id", "product_id is out of range");
                Err(AppError::Validation(errors))
            }
            None => {
                let mut errors = ValidationErrors::default();
                errors.add("product_id", "product_id is required");
                Err(AppError::Validation(errors))
            }
        }
    }
}

/// Get a customer's cart (their open order).
///
/// An existing customer with no open order gets a 200 message payload, not
/// a 404 - that asymmetry is part of the published contract.
///
/// # Errors
///
/// 404 if the customer does not exist.
pub async fn show(State(state): State<AppState>, Path(customer_id): Path<CustomerId>) -> Result<Response> {
    ensure_customer_exists(&state, customer_id).await?;

    let orders = OrderRepository::new(state.pool());

    match orders.open_for_customer(customer_id).await? {
        Some(order) => {
            let products = orders.products_in_order(order.id).await?;
            Ok(Json(OrderWithProducts { order, products }).into_response())
        }
        None => Ok(Json(json!({ "message": "Cart is empty" })).into_response()),
    }
}

/// Add a product to a customer's cart, lazily creating the open order.
///
/// # Errors
///
/// 404 if the customer or product does not exist, 400 if the product is
/// already in the cart.
pub async fn add_product(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    ApiJson(body): ApiJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<OrderWithProducts>)> {
    let product_id = body.validate()?;

    ensure_customer_exists(&state, customer_id).await?;
    ensure_product_exists(&state, product_id).await?;

    let orders = OrderRepository::new(state.pool());

    let order = orders
        .add_product_to_cart(customer_id, product_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::Duplicate("Product already in cart".to_owned())
            }
            other => AppError::from(other),
        })?;

    tracing::info!(customer_id = %customer_id, product_id = %product_id, order_id = %order.id, "product added to cart");

    let products = orders.products_in_order(order.id).await?;

    Ok((StatusCode::CREATED, Json(OrderWithProducts { order, products })))
}

/// Remove a product from a customer's cart.
///
/// # Errors
///
/// 404 if the customer or product does not exist, if the customer has no
/// open order, or if the product is not in the cart.
pub async fn remove_product(
    State(state): State<AppState>,
    Path((customer_id, product_id)): Path<(CustomerId, ProductId)>,
) -> Result<StatusCode> {
    ensure_customer_exists(&state, customer_id).await?;

    let orders = OrderRepository::new(state.pool());

    let order = orders
        .open_for_customer(customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No open order".to_owned()))?;

    ensure_product_exists(&state, product_id).await?;

    let removed = orders.remove_product(order.id, product_id).await?;
    if !removed {
        return Err(AppError::NotFound("Product not in cart".to_owned()));
    }

    tracing::info!(customer_id = %customer_id, product_id = %product_id, order_id = %order.id, "product removed from cart");

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_customer_exists(state: &AppState, id: CustomerId) -> Result<()> {
    if CustomerRepository::new(state.pool()).exists(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("customer {id} not found")))
    }
}

async fn ensure_product_exists(state: &AppState, id: ProductId) -> Result<()> {
    if ProductRepository::new(state.pool()).exists(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("product {id} not found")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_requires_product_id() {
        let body = AddToCartRequest { product_id: None };

        let err = body.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["product_id"], "product_id is required");
    }

    #[test]
    fn test_add_to_cart_accepts_valid_product_id() {
        let body = AddToCartRequest {
            product_id: Some(7),
        };
        assert_eq!(body.validate().unwrap(), ProductId::new(7));
    }

    #[test]
    fn test_add_to_cart_rejects_out_of_range_product_id() {
        let body = AddToCartRequest {
            product_id: Some(i64::MAX),
        };
        assert!(matches!(body.validate(), Err(AppError::Validation(_))));
    }
}
