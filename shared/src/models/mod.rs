//! Domain models for the Krishi Advisory Platform

pub mod advisory;
pub mod region;
pub mod weather;

pub use advisory::*;
pub use region::*;
pub use weather::*;
