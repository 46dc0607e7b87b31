use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::food_analysis::prompt::{
    PLACEHOLDER_IMPROVEMENTS, PLACEHOLDER_REPORT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Improvement {
    pub suggestion: String,
}

impl Improvement {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
        }
    }
}

/// Final output of the report pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FoodReport {
    pub report: String,
    pub improvements: Vec<Improvement>,
}

/// Body of the food analyze endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysisReport {
    pub report: String,
    pub improvements: Vec<Improvement>,
    #[schema(value_type = Object)]
    pub analysis: Value,
}

impl FoodAnalysisReport {
    /// Fixed answer served until image analysis is wired into the endpoint.
    pub fn placeholder() -> Self {
        Self {
            report: PLACEHOLDER_REPORT.to_string(),
            improvements: PLACEHOLDER_IMPROVEMENTS
                .iter()
                .map(|s| Improvement::new(*s))
                .collect(),
            analysis: json!({
                "food": "unknown",
                "leftover_ratio": "unknown",
            }),
        }
    }
}
