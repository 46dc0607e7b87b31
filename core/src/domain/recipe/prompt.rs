use crate::domain::{image::ValidatedImage, llm::ChatPrompt};

pub const RECIPE_INSTRUCTION: &str = "Look at the uploaded food or ingredient photo and recommend exactly 3 Korean dishes \
that can be made with the ingredients shown. Respond with JSON only. The top-level key must be \"recipes\", \
and every element must contain the fields name (string), ingredients (array of strings) and steps (array of strings). \
Do not add explanatory sentences or code fences; output pure JSON only.";

/// Single user turn: the fixed instruction plus the image as a data URL,
/// with the response constrained to a JSON object.
pub fn build_recipe_prompt(image: &ValidatedImage) -> ChatPrompt {
    ChatPrompt::new(RECIPE_INSTRUCTION)
        .with_image(image.to_data_url())
        .json()
}

/// Text-only variant: the ingredients arrive as a free-form description
/// instead of a photo.
pub fn build_description_prompt(description: &str) -> ChatPrompt {
    ChatPrompt::new(format!(
        "These are the ingredients the user has: {description}. \
Recommend exactly 3 Korean dishes that can be made with them. Respond with JSON only. \
The top-level key must be \"recipes\", and every element must contain the fields name (string), \
ingredients (array of strings) and steps (array of strings). Output pure JSON only."
    ))
    .json()
}
