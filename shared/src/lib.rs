//! Shared types and domain logic for the Krishi Advisory Platform
//!
//! This crate contains the weather/advisory domain models and the pure
//! advisory engine used by the backend. It performs no I/O.

pub mod advisory;
pub mod models;

pub use models::*;
