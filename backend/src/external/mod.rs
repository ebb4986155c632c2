//! External API integrations

pub mod classifier;
pub mod weather;

pub use classifier::ClassifierClient;
pub use weather::WeatherClient;
