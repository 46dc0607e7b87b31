pub mod recommend_recipes;
pub mod recommend_recipes_from_description;
