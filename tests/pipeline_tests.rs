use ladle::dataset::Recipe;
use ladle::search::{self, SearchOutcome};

fn recipe(name: Option<&str>, ingredients: Option<&str>, directions: Option<&str>) -> Recipe {
    Recipe {
        name: name.map(str::to_string),
        ingredients: ingredients.map(str::to_string),
        directions: directions.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_chicken_rice_scenario() {
    // "chicken, rice" tokenizes into two tokens; a recipe whose name covers
    // both matches even with no ingredients, a rice-only recipe does not
    let recipes = vec![
        recipe(Some("Chicken Rice Bowl"), None, None),
        recipe(Some("Plain Porridge"), Some("1 cup rice\nwater"), None),
    ];

    assert_eq!(search::tokenize("chicken, rice"), vec!["chicken", "rice"]);

    match search::search("chicken, rice", &recipes) {
        SearchOutcome::Matches(hits) => {
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].index, 0);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn test_sentinel_directions_rank_last() {
    let recipes = vec![
        recipe(Some("Skipped"), Some("rice"), Some("已跳过")),
        recipe(Some("Cooked"), Some("rice"), Some("Cook for 10 minutes.")),
    ];

    match search::search("rice", &recipes) {
        SearchOutcome::Matches(hits) => {
            assert_eq!(hits[0].recipe.display_name(), "Cooked");
            assert_eq!(hits[1].recipe.display_name(), "Skipped");
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn test_45_matches_paginate_into_3_pages() {
    let recipes: Vec<Recipe> = (0..45)
        .map(|i| recipe(Some(&format!("Rice dish {i}")), Some("rice"), None))
        .collect();

    let hits = match search::search("rice", &recipes) {
        SearchOutcome::Matches(hits) => hits,
        other => panic!("expected matches, got {other:?}"),
    };

    let third = search::paginate(&hits, 20, 3);
    assert_eq!(third.total_pages, 3);
    assert_eq!(third.items.len(), 5);

    // Page 4 is clamped back to page 3
    let fourth = search::paginate(&hits, 20, 4);
    assert_eq!(fourth.page, 3);
    assert_eq!(fourth.items.len(), 5);
}

#[test]
fn test_blank_keyword_is_a_distinct_outcome() {
    let recipes = vec![recipe(Some("Anything"), Some("rice"), None)];

    assert!(matches!(search::search("", &recipes), SearchOutcome::EmptyQuery));
    assert!(matches!(search::search("   ", &recipes), SearchOutcome::EmptyQuery));
    assert!(matches!(
        search::search(" ,/- ", &recipes),
        SearchOutcome::EmptyQuery
    ));

    // Distinct from a real query that finds nothing
    assert!(matches!(
        search::search("durian", &recipes),
        SearchOutcome::NoMatches
    ));
}

#[test]
fn test_filter_output_is_a_subset_satisfying_the_predicate() {
    let recipes = vec![
        recipe(Some("Beef Noodle Soup"), Some("beef shank\nnoodles"), None),
        recipe(None, Some("beef\nonion"), None),
        recipe(Some("Tofu Salad"), None, None),
        recipe(None, None, None),
    ];

    let tokens = search::tokenize("beef");
    let hits = search::filter(&tokens, &recipes);

    assert!(hits.len() <= recipes.len());
    for hit in &hits {
        let name = hit.recipe.name.as_deref().unwrap_or("").to_lowercase();
        let ingredients = hit
            .recipe
            .ingredients
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        assert!(name.contains("beef") || ingredients.contains("beef"));
    }
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_concatenated_pages_rebuild_the_ranked_list() {
    let recipes: Vec<Recipe> = (0..33)
        .map(|i| {
            let directions = if i % 3 == 0 { Some("Cook it.") } else { Some("抓取失败") };
            recipe(Some(&format!("Dish {i}")), Some("rice"), directions)
        })
        .collect();

    let hits = match search::search("rice", &recipes) {
        SearchOutcome::Matches(hits) => hits,
        other => panic!("expected matches, got {other:?}"),
    };

    let first = search::paginate(&hits, 10, 1);
    let mut rebuilt = Vec::new();
    for page in 1..=first.total_pages {
        rebuilt.extend(search::paginate(&hits, 10, page).items.iter().map(|h| h.index));
    }

    let full: Vec<usize> = hits.iter().map(|h| h.index).collect();
    assert_eq!(rebuilt, full);
}

#[test]
fn test_any_page_number_equals_its_clamped_form() {
    let hits: Vec<usize> = (0..45).collect();

    for requested in [0usize, 1, 2, 3, 4, 100, usize::MAX / 32] {
        let served = search::paginate(&hits, 20, requested);
        let clamped = requested.clamp(1, served.total_pages);
        let expected = search::paginate(&hits, 20, clamped);
        assert_eq!(served.page, expected.page);
        assert_eq!(served.items, expected.items);
    }
}
