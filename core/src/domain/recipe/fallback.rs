use std::sync::LazyLock;

use serde_json::{Map, Value};

use crate::domain::recipe::entities::{Recipe, RecipeReply};

pub const FALLBACK_REASON: &str = "quota_or_error";

static FALLBACK_RECIPES: LazyLock<RecipeReply> = LazyLock::new(|| {
    let recipes = vec![
        Recipe::new(
            "양파전",
            &["양파", "밀가루", "소금", "식용유"],
            &["양파 채썰기", "반죽 섞기", "팬에 부치기"],
        ),
        Recipe::new(
            "양파볶음",
            &["양파", "간장", "설탕", "참기름"],
            &["양파 채썰기", "간장과 볶기", "참기름 마무리"],
        ),
    ];

    let mut body = Map::new();
    body.insert(
        "recipes".to_string(),
        serde_json::to_value(recipes).unwrap_or(Value::Array(Vec::new())),
    );

    RecipeReply {
        body,
        use_llm: false,
        fallback_reason: Some(FALLBACK_REASON.to_string()),
    }
});

/// Canned answer used whenever the model cannot produce one.
pub fn fallback_recipes() -> RecipeReply {
    FALLBACK_RECIPES.clone()
}
