//! Integration tests for Bodega.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p bodega-cli -- migrate
//!
//! # Start the API
//! cargo run -p bodega-api
//!
//! # Run the integration tests
//! cargo test -p bodega-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP (`BODEGA_BASE_URL`, default
//! `http://localhost:3000`) and are `#[ignore]`d by default so that plain
//! `cargo test` stays hermetic.
