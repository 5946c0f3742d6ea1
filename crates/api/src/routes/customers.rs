//! Customer management handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use bodega_core::{CustomerId, Email, OrderId};

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::{ApiJson, AppError, Result, ValidationErrors};
use crate::models::customer::{
    CreateCustomerInput, Customer, CustomerWithOrders, UpdateCustomerInput,
};
use crate::models::order::OrderWithProducts;
use crate::models::product::Product;
use crate::state::AppState;

/// Request body for creating a customer.
///
/// Every field is optional at the serde level so that missing fields
/// produce a field-keyed validation error instead of a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    name: Option<String>,
    age: Option<i64>,
    phone_number: Option<String>,
    email: Option<String>,
}

impl CreateCustomerRequest {
    fn validate(self) -> Result<CreateCustomerInput> {
        let Self {
            name,
            age,
            phone_number,
            email,
        } = self;

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

        let age = match age {
            Some(age) => match i32::try_from(age) {
                Ok(age) if age >= 0 => Some(age),
                _ => {
                    errors.add("age", "age must be a non-negative integer");
                    None
                }
            },
            None => {
                errors.add("age", "age is required");
                None
            }
        };

        let email = match email {
            Some(email) => match Email::parse(&email) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.add("email", e.to_string());
                    None
                }
            },
            None => {
                errors.add("email", "email is required");
                None
            }
        };

        match (name, age, email) {
            (Some(name), Some(age), Some(email)) => Ok(CreateCustomerInput {
                name,
                age,
                phone_number,
                email,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Request body for a partial customer update.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    name: Option<String>,
    age: Option<i64>,
    phone_number: Option<String>,
    email: Option<String>,
}

impl UpdateCustomerRequest {
    fn validate(self) -> Result<UpdateCustomerInput> {
        let Self {
            name,
            age,
            phone_number,
            email,
        } = self;

        let mut errors = ValidationErrors::default();

        if let Some(name) = &name
            && name.trim().is_empty()
        {
            errors.add("name", "name cannot be empty");
        }

        let age = match age {
            Some(age) => match i32::try_from(age) {
                Ok(age) if age >= 0 => Some(age),
                _ => {
                    errors.add("age", "age must be a non-negative integer");
                    None
                }
            },
            None => None,
        };

        let email = match email {
            Some(email) => match Email::parse(&email) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.add("email", e.to_string());
                    None
                }
            },
            None => None,
        };

        if errors.is_empty() {
            Ok(UpdateCustomerInput {
                name,
                age,
                phone_number,
                email,
            })
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Create a customer.
///
/// # Errors
///
/// 400 with a field-to-message map if validation fails.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerWithOrders>)> {
    let input = body.validate()?;
    let customer = CustomerRepository::new(state.pool()).create(&input).await?;

    tracing::info!(customer_id = %customer.id, "customer created");

    // A brand-new customer has no orders yet
    Ok((
        StatusCode::CREATED,
        Json(CustomerWithOrders {
            customer,
            orders: Vec::new(),
        }),
    ))
}

/// List all customers with their orders.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerWithOrders>>> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    let customers = attach_orders(&state, customers).await?;

    Ok(Json(customers))
}

/// Get one customer by ID, with their orders.
///
/// # Errors
///
/// 404 if the customer does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<CustomerWithOrders>> {
    let customer = CustomerRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id} not found")))?;

    let mut customers = attach_orders(&state, vec![customer]).await?;
    let customer = customers
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("customer {id} not found")))?;

    Ok(Json(customer))
}

/// Partially update a customer: only supplied fields are overwritten.
///
/// # Errors
///
/// 404 if the customer does not exist, 400 if supplied fields are malformed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    ApiJson(body): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerWithOrders>> {
    let changes = body.validate()?;

    let customer = CustomerRepository::new(state.pool())
        .update(id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id} not found")))?;

    let mut customers = attach_orders(&state, vec![customer]).await?;
    let customer = customers
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("customer {id} not found")))?;

    Ok(Json(customer))
}

/// Delete a customer. Dependent accounts and orders cascade.
///
/// # Errors
///
/// 404 if the customer does not exist.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<CustomerId>) -> Result<StatusCode> {
    let deleted = CustomerRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("customer {id} not found")));
    }

    tracing::info!(customer_id = %id, "customer deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Attach each customer's orders (with their products) in three queries,
/// regardless of how many customers are being serialized.
pub(crate) async fn attach_orders(
    state: &AppState,
    customers: Vec<Customer>,
) -> Result<Vec<CustomerWithOrders>> {
    let orders_repo = OrderRepository::new(state.pool());

    let customer_ids: Vec<CustomerId> = customers.iter().map(|c| c.id).collect();
    let orders = orders_repo.for_customers(&customer_ids).await?;

    let order_ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
    let links = orders_repo.products_for_orders(&order_ids).await?;

    let mut products_by_order: HashMap<OrderId, Vec<Product>> = HashMap::new();
    for (order_id, product) in links {
        products_by_order.entry(order_id).or_default().push(product);
    }

    let mut orders_by_customer: HashMap<CustomerId, Vec<OrderWithProducts>> = HashMap::new();
    for order in orders {
        let products = products_by_order.remove(&order.id).unwrap_or_default();
        orders_by_customer
            .entry(order.customer_id)
            .or_default()
            .push(OrderWithProducts { order, products });
    }

    Ok(customers
        .into_iter()
        .map(|customer| {
            let orders = orders_by_customer.remove(&customer.id).unwrap_or_default();
            CustomerWithOrders { customer, orders }
        })
        .collect())
}
