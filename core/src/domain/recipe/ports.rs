use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, image::UploadedImage, recipe::entities::RecipeReply,
};

/// Service trait for recipe recommendation
pub trait RecipeService: Send + Sync {
    /// Only image validation errors are returned; every model-side failure
    /// degrades to the fallback reply.
    fn recommend_recipes(
        &self,
        upload: UploadedImage,
    ) -> impl Future<Output = Result<RecipeReply, CoreError>> + Send;

    /// Same fallback contract, for a text description of the ingredients.
    fn recommend_recipes_from_description(
        &self,
        description: String,
    ) -> impl Future<Output = Result<RecipeReply, CoreError>> + Send;
}
