use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Deserializer};

use crate::{
    api::handlers::AppState,
    dataset::{self, Recipe},
    error::Error,
    search::{self, SearchOutcome},
    utils::validation::parse_page_jump,
    Result,
};

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Search page template
#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate {
    query: String,
    query_encoded: String,
    status: String,
    notice: String,
    results: Vec<RecipeCardData>,
    page: usize,
    total_pages: usize,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeCardData {
    id: usize,
    name: String,
    image: String,
    ingredient_preview: Vec<String>,
    has_directions: bool,
}

impl RecipeCardData {
    fn new(id: usize, recipe: &Recipe) -> Self {
        Self {
            id,
            name: recipe.display_name().to_string(),
            image: recipe.image.clone().unwrap_or_default(),
            ingredient_preview: recipe.ingredient_preview(3),
            has_directions: search::has_valid_directions(recipe),
        }
    }
}

#[derive(Deserialize)]
pub struct SearchPageParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    q: Option<String>,
    #[serde(default = "default_page")]
    page: usize,
    /// Raw manual page-jump input, validated against the page count.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    jump: Option<String>,
}

fn default_page() -> usize {
    1
}

/// GET / - Search page
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchPageParams>,
) -> Result<impl IntoResponse> {
    let page_size = state.settings.pagination.page_size;

    let mut notice = String::new();
    let mut results = vec![];
    let mut page = 1;
    let mut total_pages = 1;
    let query = params.q.clone().unwrap_or_default();

    let status = match &params.q {
        None => "Enter ingredients to search the recipe collection.".to_string(),
        Some(q) => {
            let dataset = state.store.get_or_load().await?;

            match search::search(q, &dataset.recipes) {
                SearchOutcome::EmptyQuery => {
                    "Enter at least one ingredient to search.".to_string()
                }
                SearchOutcome::NoMatches => {
                    "No recipes contain all of those ingredients.".to_string()
                }
                SearchOutcome::Matches(hits) => {
                    total_pages = hits.len().div_ceil(page_size).max(1);

                    // A rejected jump keeps the current page and shows why
                    let requested = match params.jump.as_deref() {
                        Some(raw) => match parse_page_jump(raw, total_pages) {
                            Ok(jumped) => jumped,
                            Err(e) => {
                                notice = e.to_string();
                                params.page
                            }
                        },
                        None => params.page,
                    };

                    let paged = search::paginate(&hits, page_size, requested);
                    page = paged.page;
                    results = paged
                        .items
                        .iter()
                        .map(|hit| RecipeCardData::new(hit.index, hit.recipe))
                        .collect();
                    format!("Found {} recipes.", paged.total)
                }
            }
        }
    };

    let template = SearchTemplate {
        query_encoded: urlencoding::encode(&query).into_owned(),
        query,
        status,
        notice,
        results,
        page,
        total_pages,
    };

    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}

/// Recipe detail page template
#[derive(Template)]
#[template(path = "recipe.html")]
struct RecipeTemplate {
    recipe: RecipeDetailData,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeDetailData {
    name: String,
    image: String,
    ingredients: Vec<String>,
    directions: Vec<String>,
    has_directions: bool,
    source_url: String,
}

/// GET /recipes/:id - Recipe detail page
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<impl IntoResponse> {
    let dataset = state.store.get_or_load().await?;
    let recipe = dataset
        .recipes
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

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

    let template = RecipeTemplate {
        recipe: RecipeDetailData {
            name: recipe.display_name().to_string(),
            image: recipe.image.clone().unwrap_or_default(),
            ingredients: recipe
                .ingredient_lines()
                .into_iter()
                .map(str::to_string)
                .collect(),
            directions,
            has_directions,
            source_url: recipe.url.clone().unwrap_or_default(),
        },
    };

    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}

/// About page template
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {}

/// GET /about - About page
pub async fn about_page() -> Result<impl IntoResponse> {
    let template = AboutTemplate {};
    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}
