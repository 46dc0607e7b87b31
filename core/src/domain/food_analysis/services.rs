use serde_json::json;
use tracing::{error, info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    firebase::ports::DocumentStore,
    food_analysis::{
        entities::{AnalysisState, FoodAnalysisReport, FoodReport},
        pipeline::AnalysisExecutor,
        ports::FoodAnalysisService,
        prompt::{ANALYSIS_INSTRUCTION, ANALYSIS_SYSTEM_PROMPT, DISABLED_ANALYSIS_NOTE},
    },
    image::{UploadedImage, validate_image},
    llm::{ChatPrompt, LLMClient},
};

impl<LLM, DS> FoodAnalysisService for Service<LLM, DS>
where
    LLM: LLMClient,
    DS: DocumentStore,
{
    #[instrument(skip_all, fields(size = upload.bytes.len()))]
    async fn analyze_food(&self, upload: UploadedImage) -> Result<FoodAnalysisReport, CoreError> {
        validate_image(upload, &self.image_config)?;

        Ok(FoodAnalysisReport::placeholder())
    }

    #[instrument(skip_all, fields(size = upload.bytes.len()))]
    async fn analyze_image(&self, upload: UploadedImage) -> Result<String, CoreError> {
        let image = validate_image(upload, &self.image_config)?;

        let Some(llm_client) = &self.llm_client else {
            info!("LLM disabled, returning dummy analysis");
            let dummy = json!({
                "food": "unknown",
                "leftover_ratio": "unknown",
                "note": DISABLED_ANALYSIS_NOTE,
            });
            return Ok(dummy.to_string());
        };

        let prompt = ChatPrompt::new(ANALYSIS_INSTRUCTION)
            .with_system(ANALYSIS_SYSTEM_PROMPT)
            .with_image(image.to_data_url())
            .json();

        llm_client.generate(prompt).await.map_err(|e| {
            error!(error = %e, "Food image analysis failed");
            CoreError::from(e)
        })
    }

    #[instrument(skip_all)]
    async fn generate_report(&self, analysis: String) -> Result<FoodReport, CoreError> {
        let state = self
            .analysis_graph
            .invoke(AnalysisState::new(analysis))
            .await?;

        Ok(state.into_report())
    }
}
