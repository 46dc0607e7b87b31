use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(name: &str, ingredients: &[&str], steps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Body of the recipe endpoint.
///
/// `body` carries the model's JSON object untouched (or the canned `recipes`
/// list on fallback); `use_llm` records where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeReply {
    #[serde(flatten)]
    pub body: Map<String, Value>,
    pub use_llm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl RecipeReply {
    pub fn generated(mut body: Map<String, Value>) -> Self {
        body.remove("use_llm");
        Self {
            body,
            use_llm: true,
            fallback_reason: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        !self.use_llm
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.body
            .get("recipes")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// Parses model output into a JSON object whose `recipes` entries all carry
/// `name`, `ingredients` and `steps`. The object itself is returned as-is.
pub fn parse_model_recipes(content: &str) -> Result<Map<String, Value>, CoreError> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| {
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    let Value::Object(object) = parsed else {
        return Err(CoreError::ExternalServiceError(
            "LLM response is not a JSON object".to_string(),
        ));
    };

    let recipes = object.get("recipes").ok_or_else(|| {
        CoreError::ExternalServiceError("No recipes field in response".to_string())
    })?;

    let recipes: Vec<Recipe> = serde_json::from_value(recipes.clone()).map_err(|e| {
        CoreError::ExternalServiceError(format!("Invalid recipes format: {}", e))
    })?;

    if recipes.is_empty() {
        return Err(CoreError::ExternalServiceError(
            "LLM returned an empty recipes list".to_string(),
        ));
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_keeps_extra_fields() {
        let content = r#"{"recipes":[{"name":"김치볶음밥","ingredients":["김치","밥"],"steps":["볶기"],"time":"10m"}],"note":"spicy"}"#;

        let object = parse_model_recipes(content).unwrap();
        assert_eq!(object.get("note"), Some(&json!("spicy")));
        assert_eq!(object["recipes"][0]["time"], json!("10m"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_model_recipes(r#"[{"name":"x"}]"#).is_err());
        assert!(parse_model_recipes("here are some recipes").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let content = r#"{"recipes":[{"name":"국수","ingredients":["면"]}]}"#;
        assert!(parse_model_recipes(content).is_err());
        assert!(parse_model_recipes(r#"{"dishes":[]}"#).is_err());
        assert!(parse_model_recipes(r#"{"recipes":[]}"#).is_err());
    }

    #[test]
    fn test_generated_reply_overrides_use_llm() {
        let mut body = Map::new();
        body.insert("recipes".to_string(), json!([]));
        body.insert("use_llm".to_string(), json!("maybe"));

        let reply = RecipeReply::generated(body);
        let value = serde_json::to_value(&reply).unwrap();

        assert_eq!(value, json!({"recipes": [], "use_llm": true}));
    }
}
