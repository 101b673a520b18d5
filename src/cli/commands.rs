use crate::api::models::{SearchResponse, SearchStatus};
use crate::config::Settings;
use crate::dataset::Loader;
use crate::search::has_valid_directions;
use crate::{Error, Result};
use reqwest::Client;

/// Search recipes through a running server's JSON API
pub async fn search(server_url: &str, query: &str, page: usize) -> Result<()> {
    let client = Client::new();

    let url = format!(
        "{}/api/search?q={}&page={}",
        server_url,
        urlencoding::encode(query),
        page
    );

    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(response.error_for_status().unwrap_err()));
    }

    let search_results: SearchResponse = response.json().await?;
    print_search_results(&search_results);

    Ok(())
}

/// Download and validate the dataset, writing it to a local JSON file
pub async fn fetch(settings: &Settings, output: &str) -> Result<()> {
    let loader = Loader::new(
        settings.dataset.url.clone(),
        settings.dataset.user_agent.clone(),
        settings.dataset.max_size,
    )?;

    println!("Fetching {}", loader.url());
    let fetched = loader.fetch().await?;

    let with_directions = fetched
        .recipes
        .iter()
        .filter(|r| has_valid_directions(r))
        .count();

    let json = serde_json::to_string_pretty(&fetched.recipes)
        .map_err(|e| Error::Internal(format!("Failed to serialize dataset: {e}")))?;
    std::fs::write(output, json)?;

    println!("\x1b[32m\u{2713}\x1b[0m Saved {output}");
    println!("  Recipes: {}", fetched.recipes.len());
    println!("  With directions: {with_directions}");
    println!("  Payload: {} bytes, sha256 {}", fetched.byte_len, fetched.fingerprint);

    Ok(())
}

// Helper functions

fn print_search_results(results: &SearchResponse) {
    match results.status {
        SearchStatus::EmptyQuery => {
            println!("Enter at least one ingredient to search");
            return;
        }
        SearchStatus::NoMatches => {
            println!("No recipes found");
            return;
        }
        SearchStatus::Ok => {}
    }

    println!("\nFound {} recipes:\n", results.pagination.total);
    println!("{:<6} {:<50} {:<12}", "ID", "Name", "Directions");
    println!("{}", "-".repeat(70));

    for recipe in &results.results {
        println!(
            "{:<6} {:<50} {:<12}",
            recipe.id,
            truncate(&recipe.name, 48),
            if recipe.has_directions { "yes" } else { "no" }
        );
    }

    println!(
        "\nPage {} of {}",
        results.pagination.page, results.pagination.total_pages
    );
    println!("\nFor details: ladle search is read-only; open /recipes/<ID> on the server");
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{cut}...")
    }
}
