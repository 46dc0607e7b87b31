use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{FoodAnalysisReport, FoodReport},
    image::UploadedImage,
};

/// Service trait for food analysis business logic
pub trait FoodAnalysisService: Send + Sync {
    /// Validates the upload, then answers with the fixed placeholder analysis.
    fn analyze_food(
        &self,
        upload: UploadedImage,
    ) -> impl Future<Output = Result<FoodAnalysisReport, CoreError>> + Send;

    /// First stage: raw model analysis of the pictured leftovers.
    fn analyze_image(
        &self,
        upload: UploadedImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Second stage: report and improvement suggestions for an analysis.
    fn generate_report(
        &self,
        analysis: String,
    ) -> impl Future<Output = Result<FoodReport, CoreError>> + Send;
}
