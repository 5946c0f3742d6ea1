//! Seed command: sample data for local development.

use thiserror::Error;

use bodega_core::{Email, EmailError, Price, PriceError};

use bodega_api::config::{ApiConfig, ConfigError};
use bodega_api::db::{self, CustomerRepository, OrderRepository, ProductRepository, RepositoryError};
use bodega_api::models::customer::CreateCustomerInput;
use bodega_api::models::product::CreateProductInput;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid seed email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid seed price: {0}")]
    Price(#[from] PriceError),
}

/// Insert a sample customer, a couple of products, and a cart.
///
/// # Errors
///
/// Returns `SeedError` if configuration is missing, the database is
/// unreachable, or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    let customers = CustomerRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);

    let ann = customers
        .create(&CreateCustomerInput {
            name: "Ann".to_owned(),
            age: 30,
            phone_number: Some("5550100".to_owned()),
            email: Email::parse("ann@example.com")?,
        })
        .await?;
    tracing::info!(customer_id = %ann.id, "seeded customer");

    let mug = products
        .create(&CreateProductInput {
            name: "Mug".to_owned(),
            price: Price::from_f64(9.99)?,
        })
        .await?;

    let tea = products
        .create(&CreateProductInput {
            name: "Loose Leaf Tea".to_owned(),
            price: Price::from_f64(4.50)?,
        })
        .await?;
    tracing::info!(mug = %mug.id, tea = %tea.id, "seeded products");

    let order = orders.add_product_to_cart(ann.id, mug.id).await?;
    tracing::info!(order_id = %order.id, "seeded cart");

    Ok(())
}
