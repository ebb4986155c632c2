//! Disease knowledge-base service
//!
//! Read-only lookups over the crops, disease, and treatment tables.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Disease service
#[derive(Clone)]
pub struct DiseaseService {
    db: PgPool,
}

/// One row of the joined disease guide
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiseaseGuideEntry {
    pub disease_id: i32,
    pub disease_name: String,
    pub symptoms: String,
    pub prevention: String,
    pub crop_id: i32,
    pub crop_name: String,
    pub crop_image_url: Option<String>,
    pub crop_description: Option<String>,
    pub treatment_id: i32,
    pub treatment_name: String,
    pub dosage: Option<String>,
    pub application_method: Option<String>,
    pub precautions: Option<String>,
}

/// A crop record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Crop {
    pub crop_id: i32,
    pub crop_name: String,
    pub crop_image_url: Option<String>,
    pub description: Option<String>,
}

impl DiseaseService {
    /// Create a new DiseaseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All diseases with their crop and treatment information
    pub async fn list_disease_guide(&self) -> AppResult<Vec<DiseaseGuideEntry>> {
        let entries = sqlx::query_as::<_, DiseaseGuideEntry>(
            r#"
            SELECT d.disease_id,
                   d.disease_name,
                   d.symptoms,
                   d.prevention,
                   c.crop_id,
                   c.crop_name,
                   c.crop_image_url,
                   c.description AS crop_description,
                   t.treatment_id,
                   t.treatment_name,
                   t.dosage,
                   t.application_method,
                   t.precautions
            FROM disease d
            INNER JOIN crops c ON d.crop_id = c.crop_id
            INNER JOIN treatment t ON d.treatment_id = t.treatment_id
            ORDER BY c.crop_name, d.disease_name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// All crops ordered by name
    pub async fn list_crops(&self) -> AppResult<Vec<Crop>> {
        let crops = sqlx::query_as::<_, Crop>(
            r#"
            SELECT crop_id, crop_name, crop_image_url, description
            FROM crops
            ORDER BY crop_name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(crops)
    }
}
