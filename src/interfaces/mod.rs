//! Interface adapters exposing the application layer

pub mod http;
