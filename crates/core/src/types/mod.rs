//! Core types for Bodega.
//!
//! Type-safe wrappers for the domain concepts the storefront deals in.

pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod username;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use status::OrderStatus;
pub use username::{Username, UsernameError};
