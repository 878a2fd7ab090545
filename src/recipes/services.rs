use tracing::{info, warn};

use super::{
    client::RecipeSource,
    dto::{FindByIngredientsQuery, RandomRecipe, RecipeDetail, RecipeSummary},
};
use crate::error::{AppError, AppResult};

const RANDOM_FAILED: &str = "Failed to fetch random recipe";
const SEARCH_FAILED: &str = "Failed to search recipes";
const DETAILS_FAILED: &str = "Failed to fetch recipe details";

/// Logs the setup hint; the client only sees the route's generic message.
fn ensure_configured(source: &dyn RecipeSource, message: &'static str) -> AppResult<()> {
    if source.is_configured() {
        Ok(())
    } else {
        warn!("Missing Spoonacular API key. Set SPOONACULAR_API_KEY in .env");
        Err(AppError::Config(message.into()))
    }
}

pub async fn random(source: &dyn RecipeSource) -> AppResult<RandomRecipe> {
    ensure_configured(source, RANDOM_FAILED)?;
    let page = source
        .random()
        .await
        .map_err(AppError::upstream(RANDOM_FAILED))?;
    let recipe = page
        .recipes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("No random recipe found".into()))?;
    info!(recipe_id = recipe.id, "random recipe served");
    Ok(recipe.into())
}

/// `ingredients` is the raw comma-separated query string.
pub async fn search(
    source: &dyn RecipeSource,
    ingredients: Option<&str>,
) -> AppResult<Vec<RecipeSummary>> {
    ensure_configured(source, SEARCH_FAILED)?;
    let ingredients = ingredients.map(str::trim).unwrap_or_default();
    if ingredients.is_empty() {
        return Err(AppError::Validation(
            "ingredients query is required, e.g. ?ingredients=chicken,tomato".into(),
        ));
    }
    let hits = source
        .find_by_ingredients(&FindByIngredientsQuery::new(ingredients))
        .await
        .map_err(AppError::upstream(SEARCH_FAILED))?;
    Ok(hits.into_iter().map(RecipeSummary::from).collect())
}

pub async fn details(source: &dyn RecipeSource, id: &str) -> AppResult<RecipeDetail> {
    ensure_configured(source, DETAILS_FAILED)?;
    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Invalid recipe id".into()))?;
    let recipe = source
        .information(id)
        .await
        .map_err(AppError::upstream(DETAILS_FAILED))?;
    Ok(recipe.into())
}
