use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    firebase::ports::DocumentStore,
    image::{UploadedImage, validate_image},
    llm::{ChatPrompt, LLMClient},
    recipe::{
        entities::{RecipeReply, parse_model_recipes},
        fallback::fallback_recipes,
        ports::RecipeService,
        prompt::{build_description_prompt, build_recipe_prompt},
    },
};

impl<LLM, DS> RecipeService for Service<LLM, DS>
where
    LLM: LLMClient,
    DS: DocumentStore,
{
    #[instrument(skip_all, fields(size = upload.bytes.len()))]
    async fn recommend_recipes(&self, upload: UploadedImage) -> Result<RecipeReply, CoreError> {
        // 1. Validate image, client errors stop here
        let image = validate_image(upload, &self.image_config)?;

        // 2. No credential resolved at startup
        let Some(llm_client) = &self.llm_client else {
            info!("LLM disabled, returning fallback recipes");
            return Ok(fallback_recipes());
        };

        // 3. Call the model and check the shape of the answer
        Ok(generate_or_fallback(llm_client.as_ref(), build_recipe_prompt(&image)).await)
    }

    #[instrument(skip_all, fields(len = description.len()))]
    async fn recommend_recipes_from_description(
        &self,
        description: String,
    ) -> Result<RecipeReply, CoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::EmptyDescription);
        }

        let Some(llm_client) = &self.llm_client else {
            info!("LLM disabled, returning fallback recipes");
            return Ok(fallback_recipes());
        };

        Ok(generate_or_fallback(llm_client.as_ref(), build_description_prompt(description)).await)
    }
}

async fn generate_or_fallback<LLM>(llm_client: &LLM, prompt: ChatPrompt) -> RecipeReply
where
    LLM: LLMClient,
{
    let content = match llm_client.generate(prompt).await {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Recipe generation failed, returning fallback recipes");
            return fallback_recipes();
        }
    };

    match parse_model_recipes(&content) {
        Ok(body) => RecipeReply::generated(body),
        Err(e) => {
            warn!(error = %e, "Unusable recipe response, returning fallback recipes");
            fallback_recipes()
        }
    }
}
