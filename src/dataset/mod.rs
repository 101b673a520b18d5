pub mod loader;
pub mod store;

pub use loader::Loader;
pub use store::{Dataset, DatasetStore};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Shown wherever a recipe has no usable name.
pub const UNTITLED: &str = "Untitled recipe";

/// One record of the scraped recipe dataset.
///
/// Every content field is optional: the scraper leaves out whatever it could
/// not extract, and a record missing all of them is still a valid record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "deserialize_object_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Newline-separated ingredient lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    /// Free-text directions. May hold a scraper failure sentinel instead of
    /// actual instructions; see [`crate::search::has_valid_directions`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The dataset is a MongoDB export, so `_id` arrives either as extended JSON
/// (`{"$oid": "..."}`) or as a plain string. Anything else maps to `None`.
fn deserialize_object_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Oid {
            #[serde(rename = "$oid")]
            oid: String,
        },
        Plain(String),
        Other(serde_json::Value),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Oid { oid }) => Some(oid),
        Some(RawId::Plain(s)) => Some(s),
        _ => None,
    })
}

impl Recipe {
    /// Recipe name with a placeholder for unnamed records.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNTITLED,
        }
    }

    /// Trimmed, non-empty ingredient lines.
    pub fn ingredient_lines(&self) -> Vec<&str> {
        self.ingredients
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// The first `n` ingredient lines, for result cards.
    pub fn ingredient_preview(&self, n: usize) -> Vec<String> {
        self.ingredient_lines()
            .into_iter()
            .take(n)
            .map(str::to_string)
            .collect()
    }
}

/// Split a directions blob into display sentences.
///
/// Sentences end in `.`, `!` or `?`; a blob with no terminator at all is
/// returned whole.
pub fn direction_sentences(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence regex is valid"));

    let sentences: Vec<String> = re
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        vec![text.trim().to_string()]
    } else {
        sentences
    }
}
