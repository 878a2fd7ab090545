use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{
    dto::FindByIngredientsQuery,
    upstream::{IngredientMatch, RandomRecipes, UpstreamRecipe},
};
use crate::config::SpoonacularConfig;

/// Upstream recipe provider. One outbound call per method, no retries.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// False when no API key is configured.
    fn is_configured(&self) -> bool;
    async fn random(&self) -> anyhow::Result<RandomRecipes>;
    async fn find_by_ingredients(
        &self,
        query: &FindByIngredientsQuery,
    ) -> anyhow::Result<Vec<IngredientMatch>>;
    async fn information(&self, id: u64) -> anyhow::Result<UpstreamRecipe>;
}

#[derive(Clone)]
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SpoonacularClient {
    pub fn new(cfg: &SpoonacularConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("flavor-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn key(&self) -> anyhow::Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SPOONACULAR_API_KEY not set"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn random(&self) -> anyhow::Result<RandomRecipes> {
        let page = self
            .http
            .get(self.url("/recipes/random"))
            .query(&[("apiKey", self.key()?), ("number", "1")])
            .send()
            .await
            .context("spoonacular random request")?
            .error_for_status()
            .context("spoonacular random status")?
            .json::<RandomRecipes>()
            .await
            .context("decode random recipes")?;
        debug!(count = page.recipes.len(), "random recipes fetched");
        Ok(page)
    }

    async fn find_by_ingredients(
        &self,
        query: &FindByIngredientsQuery,
    ) -> anyhow::Result<Vec<IngredientMatch>> {
        let hits = self
            .http
            .get(self.url("/recipes/findByIngredients"))
            .query(&[("apiKey", self.key()?)])
            .query(query)
            .send()
            .await
            .context("spoonacular findByIngredients request")?
            .error_for_status()
            .context("spoonacular findByIngredients status")?
            .json::<Vec<IngredientMatch>>()
            .await
            .context("decode findByIngredients")?;
        debug!(count = hits.len(), ingredients = %query.ingredients, "search results fetched");
        Ok(hits)
    }

    async fn information(&self, id: u64) -> anyhow::Result<UpstreamRecipe> {
        let recipe = self
            .http
            .get(self.url(&format!("/recipes/{}/information", id)))
            .query(&[("apiKey", self.key()?), ("includeNutrition", "false")])
            .send()
            .await
            .with_context(|| format!("spoonacular information request for {}", id))?
            .error_for_status()
            .with_context(|| format!("spoonacular information status for {}", id))?
            .json::<UpstreamRecipe>()
            .await
            .context("decode recipe information")?;
        Ok(recipe)
    }
}
