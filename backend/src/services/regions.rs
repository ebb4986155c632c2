//! Priority-region lookup service
//!
//! The region sheet is a small CSV loaded once at startup and held in
//! memory. Lookups are dropdown option extraction and predicate filtering:
//! exact match on state and priority region, case-insensitive substring on
//! district (district cells hold comma-separated lists).

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use serde::Deserialize;
use shared::models::region::{DropdownOptions, OptionItem, RegionRecord};

use crate::error::{AppError, AppResult};

/// Search predicate over the region sheet; empty fields match everything
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegionFilter {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority_region: String,
    #[serde(default)]
    pub district: String,
}

/// In-memory priority-region sheet
#[derive(Debug, Clone)]
pub struct RegionStore {
    rows: Vec<RegionRecord>,
}

impl RegionStore {
    /// Load the sheet from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                AppError::DataSourceUnavailable(format!(
                    "region sheet {}: {}",
                    path.display(),
                    e
                ))
            })?;

        Self::from_reader(reader)
    }

    fn from_reader<R: io::Read>(mut reader: csv::Reader<R>) -> AppResult<Self> {
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<RegionRecord>, _>>()
            .map_err(|e| AppError::DataSourceUnavailable(format!("region sheet: {}", e)))?;

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Options for the three search dropdowns
    ///
    /// States and priority regions keep sheet order; districts are split on
    /// commas, deduplicated, and sorted.
    pub fn options(&self) -> DropdownOptions {
        let mut states: Vec<String> = Vec::new();
        let mut regions: Vec<String> = Vec::new();
        let mut districts: BTreeSet<String> = BTreeSet::new();

        for row in &self.rows {
            if !row.states.is_empty() && !states.contains(&row.states) {
                states.push(row.states.clone());
            }
            if !row.priority_region.is_empty() && !regions.contains(&row.priority_region) {
                regions.push(row.priority_region.clone());
            }
            for district in row.district.split(',') {
                let district = district.trim();
                if !district.is_empty() {
                    districts.insert(district.to_string());
                }
            }
        }

        DropdownOptions {
            states: states.into_iter().map(option_item).collect(),
            priority_regions: regions.into_iter().map(option_item).collect(),
            districts: districts.into_iter().map(option_item).collect(),
        }
    }

    /// Filter rows by the given predicates
    pub fn search(&self, filter: &RegionFilter) -> Vec<RegionRecord> {
        let state = filter.state.trim();
        let region = filter.priority_region.trim();
        let district = filter.district.trim().to_lowercase();

        self.rows
            .iter()
            .filter(|row| state.is_empty() || row.states.trim() == state)
            .filter(|row| region.is_empty() || row.priority_region.trim() == region)
            .filter(|row| district.is_empty() || row.district.to_lowercase().contains(&district))
            .cloned()
            .collect()
    }
}

fn option_item(value: String) -> OptionItem {
    OptionItem {
        label: value.clone(),
        value,
    }
}
