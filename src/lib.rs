//! # ATL Ledger
//!
//! Authority-to-load (ATL) booking service: reserves quantities from the
//! supplier appointments of customer order slips and keeps the remaining
//! balances, finalized flags and order slip statuses consistent.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: order slips, appointments, bookings, the status lifecycle
//!   and the persistence ports
//! - **application**: ledger queries and the reservation engine
//! - **infrastructure**: SeaORM store (SQLite) and an in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryBookingStore, SeaOrmBookingStore};

pub use interfaces::http::create_api_router;
