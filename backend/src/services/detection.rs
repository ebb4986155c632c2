//! Leaf-disease detection service
//!
//! Orchestrates the external classifier and serves the class-label catalog.
//! Labels are loaded once at startup from a JSON map of index -> class name
//! and injected into the service; there is no global model state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::external::classifier::{ClassifierClient, ClassifierPrediction, TopPrediction};

/// Class labels for the disease classifier, ordered by model output index
#[derive(Debug, Clone)]
pub struct LabelStore {
    labels: Vec<String>,
}

impl LabelStore {
    /// Load labels from a JSON file mapping stringified indices to names
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::DataSourceUnavailable(format!("class labels {}: {}", path.display(), e))
        })?;

        Ok(Self {
            labels: parse_labels(&raw)?,
        })
    }

    /// All class names, in model output order
    pub fn classes(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn parse_labels(raw: &str) -> AppResult<Vec<String>> {
    let map: BTreeMap<String, String> = serde_json::from_str(raw)
        .map_err(|e| AppError::DataSourceUnavailable(format!("class labels: {}", e)))?;

    let mut indexed = map
        .into_iter()
        .map(|(key, label)| {
            key.parse::<usize>()
                .map(|index| (index, label))
                .map_err(|_| {
                    AppError::DataSourceUnavailable(format!(
                        "class labels: non-numeric index '{}'",
                        key
                    ))
                })
        })
        .collect::<AppResult<Vec<_>>>()?;
    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

/// Result of a classification request
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: f32,
    pub top_predictions: Vec<TopPrediction>,
}

impl From<ClassifierPrediction> for PredictionResult {
    fn from(p: ClassifierPrediction) -> Self {
        PredictionResult {
            prediction: p.prediction,
            confidence: p.confidence,
            top_predictions: p.top_predictions,
        }
    }
}

/// Class catalog response
#[derive(Debug, Clone, Serialize)]
pub struct ClassListing {
    pub classes: Vec<String>,
    pub num_classes: usize,
}

/// Detection service
#[derive(Clone)]
pub struct DetectionService {
    classifier: ClassifierClient,
    labels: Arc<LabelStore>,
}

impl DetectionService {
    /// Create a new DetectionService instance
    pub fn new(classifier: ClassifierClient, labels: Arc<LabelStore>) -> Self {
        Self { classifier, labels }
    }

    /// Classify an uploaded leaf image
    pub async fn predict(&self, image: &[u8]) -> AppResult<PredictionResult> {
        let prediction = self.classifier.classify(image).await?;
        Ok(prediction.into())
    }

    /// List all known disease classes
    pub fn classes(&self) -> ClassListing {
        ClassListing {
            classes: self.labels.classes().to_vec(),
            num_classes: self.labels.len(),
        }
    }
}
