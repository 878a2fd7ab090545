use serde::{Deserialize, Serialize};

use super::upstream::{IngredientMatch, UpstreamRecipe};

pub const NO_INSTRUCTIONS: &str = "No instructions provided.";

/// Spoonacular `ranking=2`: maximize used ingredients.
pub const RANKING_MAXIMIZE_USED: u8 = 2;
pub const SEARCH_LIMIT: u8 = 12;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub ingredients: Option<String>,
}

/// Query forwarded to `findByIngredients`; the API key is added by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindByIngredientsQuery {
    pub ingredients: String,
    pub number: u8,
    pub ranking: u8,
    pub ignore_pantry: bool,
}

impl FindByIngredientsQuery {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            number: SEARCH_LIMIT,
            ranking: RANKING_MAXIMIZE_USED,
            ignore_pantry: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// HTML as delivered upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomRecipe {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub instructions: String,
    pub ingredients: Vec<String>,
}

impl From<IngredientMatch> for RecipeSummary {
    fn from(r: IngredientMatch) -> Self {
        Self {
            id: r.id,
            title: r.title,
            image: r.image,
            used_ingredients: r.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: r.missed_ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

impl From<UpstreamRecipe> for RecipeDetail {
    fn from(r: UpstreamRecipe) -> Self {
        Self {
            id: r.id,
            title: r.title,
            image: r.image,
            summary: r.summary,
            ready_in_minutes: r.ready_in_minutes,
            source_url: r.source_url,
        }
    }
}

impl From<UpstreamRecipe> for RandomRecipe {
    fn from(r: UpstreamRecipe) -> Self {
        let instructions = instructions_text(&r);
        let ingredients = r
            .extended_ingredients
            .into_iter()
            .filter_map(|i| i.original.filter(|o| !o.is_empty()).or(i.name))
            .collect();
        Self {
            id: r.id,
            title: r.title,
            image: r.image,
            instructions,
            ingredients,
        }
    }
}

/// Direct `instructions`, else the first analyzed block's steps joined by spaces,
/// else a placeholder.
fn instructions_text(r: &UpstreamRecipe) -> String {
    if let Some(text) = r.instructions.as_deref().filter(|t| !t.is_empty()) {
        return text.to_string();
    }
    let joined = r
        .analyzed_instructions
        .first()
        .map(|block| {
            block
                .steps
                .iter()
                .map(|s| s.step.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    if joined.is_empty() {
        NO_INSTRUCTIONS.to_string()
    } else {
        joined
    }
}
