use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{RandomRecipe, RecipeDetail, RecipeSummary, SearchParams},
    services,
};
use crate::{error::AppResult, state::AppState};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/random", get(random_recipe))
        .route("/recipes/search", get(search_recipes))
        .route("/recipes/:id", get(recipe_details))
}

#[instrument(skip(state))]
pub async fn random_recipe(State(state): State<AppState>) -> AppResult<Json<RandomRecipe>> {
    services::random(state.recipes.as_ref()).await.map(Json)
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<Vec<RecipeSummary>>> {
    let Query(params) = params?;
    services::search(state.recipes.as_ref(), params.ingredients.as_deref())
        .await
        .map(Json)
}

#[instrument(skip(state))]
pub async fn recipe_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RecipeDetail>> {
    services::details(state.recipes.as_ref(), &id).await.map(Json)
}
