use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    dataset::{self, DatasetStore, Recipe},
    search::{self, Hit, SearchOutcome},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub settings: crate::config::Settings,
}

fn recipe_card(hit: &Hit<'_>) -> RecipeCard {
    RecipeCard {
        id: hit.index,
        name: hit.recipe.display_name().to_string(),
        ingredient_preview: hit.recipe.ingredient_preview(3),
        image: hit.recipe.image.clone(),
        has_directions: search::has_valid_directions(hit.recipe),
    }
}

fn empty_response(status: SearchStatus, limit: usize) -> SearchResponse {
    SearchResponse {
        status,
        results: vec![],
        pagination: Pagination {
            page: 1,
            limit,
            total: 0,
            total_pages: 1,
        },
    }
}

/// GET /api/search - Search recipes by ingredient keywords
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let limit = params
        .limit
        .unwrap_or(state.settings.pagination.page_size)
        .clamp(1, state.settings.pagination.api_max_limit);

    let dataset = state.store.get_or_load().await?;

    let response = match search::search(&params.q, &dataset.recipes) {
        SearchOutcome::EmptyQuery => empty_response(SearchStatus::EmptyQuery, limit),
        SearchOutcome::NoMatches => empty_response(SearchStatus::NoMatches, limit),
        SearchOutcome::Matches(hits) => {
            let page = search::paginate(&hits, limit, params.page);
            SearchResponse {
                status: SearchStatus::Ok,
                results: page.items.iter().map(recipe_card).collect(),
                pagination: Pagination {
                    page: page.page,
                    limit,
                    total: page.total,
                    total_pages: page.total_pages,
                },
            }
        }
    };

    Ok(Json(response))
}

/// GET /api/recipes/:id - Get recipe details by dataset position
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let dataset = state.store.get_or_load().await?;
    let recipe = dataset
        .recipes
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    Ok(Json(recipe_detail(id, recipe)))
}

fn recipe_detail(id: usize, recipe: &Recipe) -> RecipeDetail {
    let has_directions = search::has_valid_directions(recipe);
    let directions = if has_directions {
        recipe
            .directions
            .as_deref()
            .map(dataset::direction_sentences)
            .unwrap_or_default()
    } else {
        vec![]
    };

    RecipeDetail {
        id,
        name: recipe.display_name().to_string(),
        ingredients: recipe
            .ingredient_lines()
            .into_iter()
            .map(str::to_string)
            .collect(),
        directions,
        has_directions,
        image: recipe.image.clone(),
        source_url: recipe.url.clone(),
    }
}

/// GET /api/stats - Dataset statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    let dataset = state.store.get_or_load().await?;

    let with_directions = dataset
        .recipes
        .iter()
        .filter(|r| search::has_valid_directions(r))
        .count();

    Ok(Json(Stats {
        total_recipes: dataset.recipes.len(),
        with_directions,
        fingerprint: dataset.fingerprint.clone(),
        loaded_at: dataset.loaded_at.to_rfc3339(),
        generation: dataset.generation,
    }))
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Readiness check: is the dataset in memory?
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let loaded = state.store.current().await.is_some();
    Json(ReadinessResponse {
        ready: loaded,
        dataset: if loaded { "loaded" } else { "not loaded" }.to_string(),
    })
}
