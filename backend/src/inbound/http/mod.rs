//! HTTP inbound adapter exposing REST endpoints.

pub mod envelope;
pub mod error;
pub mod failure;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, route_not_found};
