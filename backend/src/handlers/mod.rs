//! HTTP handlers for the Krishi Advisory Platform

pub mod dashboard;
pub mod detection;
pub mod explore;
pub mod health;
pub mod regions;

pub use dashboard::{get_dashboard, list_cities};
pub use detection::{list_classes, predict};
pub use explore::{list_crops, list_disease_guide};
pub use health::health_check;
pub use regions::{get_region_options, search_regions};
