//! Domain types for the storefront.
//!
//! These are validated domain records, separate from the database row types
//! the repositories deserialize into. They serialize directly as the API's
//! JSON payloads.

pub mod account;
pub mod customer;
pub mod order;
pub mod product;

pub use account::{Account, CreateAccountInput};
pub use customer::{CreateCustomerInput, Customer, CustomerWithOrders, UpdateCustomerInput};
pub use order::{Order, OrderWithProducts};
pub use product::{CreateProductInput, Product};
