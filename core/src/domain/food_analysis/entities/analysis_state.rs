use serde::{Deserialize, Serialize};

use crate::domain::food_analysis::entities::{FoodReport, Improvement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisStage {
    Init,
    Analyze,
    Combined,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisState {
    pub stage: AnalysisStage,
    pub analysis: String,
    pub report: Option<String>,
    pub improvements: Vec<Improvement>,
}

impl AnalysisState {
    pub fn new(analysis: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Init,
            analysis: analysis.into(),
            report: None,
            improvements: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.stage == AnalysisStage::Done
    }

    pub(crate) fn with_report(mut self, report: FoodReport) -> Self {
        self.report = Some(report.report);
        self.improvements = report.improvements;
        self
    }

    pub fn into_report(self) -> FoodReport {
        FoodReport {
            report: self.report.unwrap_or_default(),
            improvements: self.improvements,
        }
    }
}
