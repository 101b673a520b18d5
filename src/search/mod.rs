//! The search pipeline: tokenize → filter → rank → paginate.
//!
//! Every stage is a pure function over the loaded dataset; a new search
//! recomputes from scratch and shares no state with previous searches.

use crate::dataset::Recipe;
use regex::Regex;
use std::sync::OnceLock;

/// Sentinel values the upstream scraper writes into `directions` when it
/// could not extract real instructions. These are data values of the
/// published dataset and must match it byte for byte.
pub const DIRECTION_SENTINELS: [&str; 3] = ["未能自动找到做法", "抓取失败", "已跳过"];

/// A single match: the recipe plus its position in the loaded dataset,
/// which doubles as its public id.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub index: usize,
    pub recipe: &'a Recipe,
}

/// Outcome of a search. An empty keyword is distinct from a keyword that
/// matched nothing.
#[derive(Debug)]
pub enum SearchOutcome<'a> {
    /// The keyword contained no tokens; no filtering was performed.
    EmptyQuery,
    /// Tokens were present but no recipe matched all of them.
    NoMatches,
    /// Ranked matches, in directions-first order.
    Matches(Vec<Hit<'a>>),
}

fn token_delimiters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ /\-,]+").expect("delimiter regex is valid"))
}

/// Split a raw keyword into lower-cased search tokens.
///
/// Tokens are separated by runs of space, `/`, `-` or `,`; empty tokens are
/// dropped.
pub fn tokenize(keyword: &str) -> Vec<String> {
    let lowered = keyword.trim().to_lowercase();
    token_delimiters()
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// True iff the recipe carries real directions: the field is present,
/// non-empty and free of all scraper failure sentinels.
pub fn has_valid_directions(recipe: &Recipe) -> bool {
    match recipe.directions.as_deref() {
        Some(d) if !d.is_empty() => !DIRECTION_SENTINELS.iter().any(|s| d.contains(s)),
        _ => false,
    }
}

/// A recipe matches iff every token is a case-insensitive substring of its
/// name or of its ingredients blob. Absent fields never match.
fn matches_all_tokens(recipe: &Recipe, tokens: &[String]) -> bool {
    let name = recipe.name.as_deref().map(str::to_lowercase);
    let ingredients = recipe.ingredients.as_deref().map(str::to_lowercase);

    tokens.iter().all(|token| {
        name.as_deref().is_some_and(|n| n.contains(token.as_str()))
            || ingredients
                .as_deref()
                .is_some_and(|i| i.contains(token.as_str()))
    })
}

/// Select the recipes matching all tokens, preserving dataset order.
pub fn filter<'a>(tokens: &[String], recipes: &'a [Recipe]) -> Vec<Hit<'a>> {
    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| matches_all_tokens(recipe, tokens))
        .map(|(index, recipe)| Hit { index, recipe })
        .collect()
}

/// Order matches so that recipes with real directions come first.
///
/// Ties keep their relative order from `filter`; `slice::sort_by_key` is a
/// stable sort, which this contract relies on.
pub fn rank(hits: &mut [Hit<'_>]) {
    hits.sort_by_key(|hit| !has_valid_directions(hit.recipe));
}

/// Run the whole pipeline for one keyword over the loaded dataset.
pub fn search<'a>(keyword: &str, recipes: &'a [Recipe]) -> SearchOutcome<'a> {
    let tokens = tokenize(keyword);
    if tokens.is_empty() {
        return SearchOutcome::EmptyQuery;
    }

    let mut hits = filter(&tokens, recipes);
    if hits.is_empty() {
        return SearchOutcome::NoMatches;
    }

    rank(&mut hits);
    SearchOutcome::Matches(hits)
}

/// One page of a ranked result list.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// The page actually served, after clamping.
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice out one page of `items`.
///
/// `total_pages` is never zero, and an out-of-range `page` (zero or past the
/// end) is clamped into `[1, total_pages]` rather than rejected.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    Page {
        items: &items[start.min(total)..end],
        page,
        total,
        total_pages,
    }
}
