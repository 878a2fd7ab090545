//! Subset of the Spoonacular response schema that the proxy reads.
//!
//! Every field the proxy can live without is defaulted so a sparse upstream record
//! still deserializes.

use serde::Deserialize;

/// `GET /recipes/random` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RandomRecipes {
    pub recipes: Vec<UpstreamRecipe>,
}

/// Full recipe as returned by `/recipes/random` and `/recipes/{id}/information`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpstreamRecipe {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub source_url: Option<String>,
    pub instructions: Option<String>,
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    pub extended_ingredients: Vec<ExtendedIngredient>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzedInstruction {
    pub name: String,
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtendedIngredient {
    pub name: Option<String>,
    pub original: Option<String>,
}

/// One hit of `GET /recipes/findByIngredients`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngredientMatch {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredients: Vec<MatchedIngredient>,
    pub missed_ingredients: Vec<MatchedIngredient>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchedIngredient {
    pub name: String,
}
