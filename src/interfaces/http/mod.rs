//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, claims and JSON extractors
//! - `modules`: one module per resource (dto + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
