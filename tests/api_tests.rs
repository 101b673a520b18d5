use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;

use ladle::api::handlers::AppState;
use ladle::api::models::{RecipeDetail, SearchResponse, SearchStatus, Stats};
use ladle::api::routes::create_router;
use ladle::config::{DatasetConfig, PaginationConfig, ServerConfig, Settings};
use ladle::dataset::{DatasetStore, Loader, Recipe};

fn test_settings() -> Settings {
    Settings {
        dataset: DatasetConfig {
            url: "https://example.com/recipes.json".to_string(),
            max_size: 5_242_880,
            user_agent: "LadleTest/0.1".to_string(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            external_url: None,
            api_rate_limit: 100,
            max_request_body_size: 1_048_576,
        },
        pagination: PaginationConfig {
            page_size: 20,
            api_max_limit: 100,
        },
    }
}

fn recipe(name: &str, ingredients: &str, directions: &str) -> Recipe {
    Recipe {
        name: (!name.is_empty()).then(|| name.to_string()),
        ingredients: (!ingredients.is_empty()).then(|| ingredients.to_string()),
        directions: (!directions.is_empty()).then(|| directions.to_string()),
        ..Default::default()
    }
}

fn test_state(recipes: Vec<Recipe>) -> AppState {
    let settings = test_settings();
    let loader = Loader::new(
        settings.dataset.url.clone(),
        settings.dataset.user_agent.clone(),
        settings.dataset.max_size,
    )
    .unwrap();

    AppState {
        store: Arc::new(DatasetStore::preloaded(loader, recipes)),
        settings,
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(state: AppState, uri: &str) -> (StatusCode, Option<T>) {
    let app = create_router(state.clone(), &state.settings);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).ok())
}

#[tokio::test]
async fn test_search_returns_ranked_matches() {
    let state = test_state(vec![
        recipe("Skipped Rice", "rice", "已跳过"),
        recipe("Good Rice", "2 cups rice\nsalt", "Boil the rice."),
        recipe("Tofu Salad", "tofu", "Toss it."),
    ]);

    let (status, body): (_, Option<SearchResponse>) = get_json(state, "/api/search?q=rice").await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert_eq!(body.status, SearchStatus::Ok);
    assert_eq!(body.pagination.total, 2);
    assert_eq!(body.results[0].name, "Good Rice");
    assert!(body.results[0].has_directions);
    assert_eq!(body.results[1].name, "Skipped Rice");
    assert!(!body.results[1].has_directions);
}

#[tokio::test]
async fn test_search_empty_query_is_distinct_from_no_matches() {
    let state = test_state(vec![recipe("Congee", "rice", "")]);

    let (status, body): (_, Option<SearchResponse>) =
        get_json(state.clone(), "/api/search?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().status, SearchStatus::EmptyQuery);

    let (status, body): (_, Option<SearchResponse>) =
        get_json(state, "/api/search?q=durian").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, SearchStatus::NoMatches);
    assert!(body.results.is_empty());
}

#[tokio::test]
async fn test_limit_defaults_to_configured_page_size() {
    let recipes: Vec<Recipe> = (0..45)
        .map(|i| recipe(&format!("Rice {i}"), "rice", "Cook."))
        .collect();
    let mut state = test_state(recipes);
    state.settings.pagination.page_size = 35;

    let (status, body): (_, Option<SearchResponse>) =
        get_json(state, "/api/search?q=rice").await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert_eq!(body.pagination.limit, 35);
    assert_eq!(body.results.len(), 35);
    assert_eq!(body.pagination.total_pages, 2);
}

#[tokio::test]
async fn test_search_page_clamping_over_the_api() {
    let recipes: Vec<Recipe> = (0..45)
        .map(|i| recipe(&format!("Rice {i}"), "rice", "Cook."))
        .collect();
    let state = test_state(recipes);

    let (_, body): (_, Option<SearchResponse>) =
        get_json(state.clone(), "/api/search?q=rice&page=4&limit=20").await;
    let body = body.unwrap();
    assert_eq!(body.pagination.total_pages, 3);
    assert_eq!(body.pagination.page, 3);
    assert_eq!(body.results.len(), 5);
}

#[tokio::test]
async fn test_recipe_detail_and_unknown_index() {
    let state = test_state(vec![recipe(
        "Congee",
        "rice\nwater",
        "Simmer rice. Season to taste.",
    )]);

    let (status, body): (_, Option<RecipeDetail>) = get_json(state.clone(), "/api/recipes/0").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.name, "Congee");
    assert_eq!(body.ingredients, vec!["rice", "water"]);
    assert_eq!(body.directions, vec!["Simmer rice.", "Season to taste."]);

    let (status, _): (_, Option<RecipeDetail>) = get_json(state, "/api/recipes/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_counts_valid_directions() {
    let state = test_state(vec![
        recipe("A", "rice", "Cook."),
        recipe("B", "rice", "抓取失败"),
        recipe("C", "rice", ""),
    ]);

    let (status, body): (_, Option<Stats>) = get_json(state, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.total_recipes, 3);
    assert_eq!(body.with_directions, 1);
}

#[tokio::test]
async fn test_search_page_renders_html() {
    let state = test_state(vec![recipe("Good Rice", "rice", "Boil the rice.")]);
    let app = create_router(state.clone(), &state.settings);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=rice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Good Rice"));
    assert!(html.contains("Found 1 recipes."));
}

#[tokio::test]
async fn test_rejected_page_jump_keeps_current_page() {
    let recipes: Vec<Recipe> = (0..45)
        .map(|i| recipe(&format!("Rice {i}"), "rice", "Cook."))
        .collect();
    let state = test_state(recipes);
    let app = create_router(state.clone(), &state.settings);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=rice&page=2&jump=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Enter a page between 1 and 3"));
    assert!(html.contains("Page 2 of 3"));
}

#[tokio::test]
async fn test_readiness_reflects_dataset_state() {
    let state = test_state(vec![recipe("Congee", "rice", "")]);
    let app = create_router(state.clone(), &state.settings);

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ready"], true);
}
