//! Product management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use bodega_core::{Price, ProductId};

use crate::db::ProductRepository;
use crate::error::{ApiJson, AppError, Result, ValidationErrors};
use crate::models::product::{CreateProductInput, Product};
use crate::state::AppState;

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    name: Option<String>,
    price: Option<f64>,
}

impl CreateProductRequest {
    fn validate(self) -> Result<CreateProductInput> {
        let Self { name, price } = self;

        let mut errors = ValidationErrors::default();

        let name = match name {
            Some(name) if !name.trim().is_empty() => Some(name),
            Some(_) => {
                errors.add("name", "name cannot be empty");
                None
            }
            None => {
                errors.add("name", "name is required");
                None
            }
        };

        let price = match price {
            Some(price) => match Price::from_f64(price) {
                Ok(price) => Some(price),
                Err(e) => {
                    errors.add("price", e.to_string());
                    None
                }
            },
            None => {
                errors.add("price", "price is required");
                None
            }
        };

        match (name, price) {
            (Some(name), Some(price)) => Ok(CreateProductInput { name, price }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Create a product.
///
/// # Errors
///
/// 400 with a field-to-message map if validation fails.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let input = body.validate()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(products))
}

/// Get one product by ID.
///
/// # Errors
///
/// 404 if the product does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    Ok(Json(product))
}

/// Delete a product. Cart associations cascade.
///
/// # Errors
///
/// 404 if the product does not exist.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    tracing::info!(product_id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_accepts_valid_body() {
        let body = CreateProductRequest {
            name: Some("Mug".to_owned()),
            price: Some(9.99),
        };

        let input = body.validate().unwrap();
        assert_eq!(input.name, "Mug");
        assert_eq!(input.price, Price::from_f64(9.99).unwrap());
    }

    #[test]
    fn test_validation_accepts_free_product() {
        let body = CreateProductRequest {
            name: Some("Sample".to_owned()),
            price: Some(0.0),
        };

        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_validation_keys_missing_fields() {
        let body = CreateProductRequest {
            name: None,
            price: None,
        };

        let err = body.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"], "name is required");
        assert_eq!(json["price"], "price is required");
    }

    #[test]
    fn test_validation_rejects_negative_price() {
        let body = CreateProductRequest {
            name: Some("Mug".to_owned()),
            price: Some(-9.99),
        };

        let err = body.validate().unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.get("price").is_some());
    }
}
