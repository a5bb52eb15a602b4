//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL reachability via Diesel
//!
//! Adapters convert between infrastructure types and domain types. They
//! contain no business logic.

pub mod persistence;
