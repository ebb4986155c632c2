//! Priority-region lookup models

use serde::{Deserialize, Serialize};

/// One row of the priority-region sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRecord {
    pub states: String,
    pub priority_region: String,
    pub priority_level: String,
    /// Comma-separated list of districts covered by the row
    pub district: String,
    pub target_crops: String,
    pub main_problem: String,
    pub notes: String,
}

/// A single dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

/// Options for the three region-search dropdowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownOptions {
    pub states: Vec<OptionItem>,
    pub priority_regions: Vec<OptionItem>,
    pub districts: Vec<OptionItem>,
}
