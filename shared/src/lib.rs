//! Shared types and models for the packaging production tracking platform
//!
//! This crate contains the domain records, the stock reconciliation engine and
//! the calculation helpers shared between the backend and the frontend (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
