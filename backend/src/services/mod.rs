//! Business logic services for the Krishi Advisory Platform

pub mod dashboard;
pub mod detection;
pub mod disease;
pub mod regions;

pub use dashboard::DashboardService;
pub use detection::{DetectionService, LabelStore};
pub use disease::DiseaseService;
pub use regions::RegionStore;
