//! Order slip registration and supplier appointment

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
