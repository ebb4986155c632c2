//! Leaf-disease classifier client
//!
//! Client for the externally hosted inference microservice. The model itself
//! is opaque to this backend: we send an encoded image and get back a class
//! label with confidence scores.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::{AppError, AppResult};

/// Client for the leaf-disease inference microservice
#[derive(Clone)]
pub struct ClassifierClient {
    endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Request to classify a leaf image
#[derive(Debug, Serialize)]
struct ClassifyRequest {
    image_base64: String,
}

/// A single candidate class with its confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPrediction {
    pub class: String,
    pub confidence: f32,
}

/// Response from the inference service
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierPrediction {
    pub prediction: String,
    pub confidence: f32,
    pub top_predictions: Vec<TopPrediction>,
}

impl ClassifierClient {
    /// Create a new classifier client from configuration
    pub fn new(config: &ClassifierConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    /// Send an image for classification
    pub async fn classify(&self, image: &[u8]) -> AppResult<ClassifierPrediction> {
        let request = ClassifyRequest {
            image_base64: STANDARD.encode(image),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Classifier(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Classifier(format!("API returned {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Classifier(format!("failed to parse response: {}", e)))
    }
}
