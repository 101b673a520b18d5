use serde::{Deserialize, Serialize};

/// Search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: usize,
    /// Results per page; falls back to the configured page size.
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_page() -> usize {
    1
}

/// Outcome of a search request. An empty query is a distinct outcome, not
/// an error, and so is a query that matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    EmptyQuery,
    NoMatches,
    Ok,
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    pub results: Vec<RecipeCard>,
    pub pagination: Pagination,
}

/// Recipe card for search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCard {
    /// Position of the recipe in the loaded dataset.
    pub id: usize,
    pub name: String,
    pub ingredient_preview: Vec<String>,
    pub image: Option<String>,
    pub has_directions: bool,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Full recipe details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: usize,
    pub name: String,
    pub ingredients: Vec<String>,
    /// Directions split into sentences; empty when the recipe has none.
    pub directions: Vec<String>,
    pub has_directions: bool,
    pub image: Option<String>,
    pub source_url: Option<String>,
}

/// Dataset statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_recipes: usize,
    pub with_directions: usize,
    pub fingerprint: String,
    pub loaded_at: String,
    pub generation: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub dataset: String,
}
