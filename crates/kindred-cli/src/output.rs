//! Output formatting for engine results.
//!
//! Supports both human-readable terminal output and JSON for scripting.
//! JSON shapes mirror the engine types so transport consumers and the CLI
//! agree on field names.

use kindred_core::engine::{Health, Listing};
use serde::Serialize;

/// JSON output for `recommend`.
#[derive(Serialize)]
struct RecommendOutput<'a> {
    query: &'a str,
    recommendations: &'a [String],
}

/// JSON output for `search`.
#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    matches: &'a [String],
    count: usize,
}

/// Formats recommendations as pretty JSON.
pub fn recommend_json(query: &str, titles: &[String]) -> String {
    to_json(&RecommendOutput {
        query,
        recommendations: titles,
    })
}

/// Formats recommendations for terminal display.
pub fn recommend_human(query: &str, titles: &[String]) -> String {
    if titles.is_empty() {
        return format!("No recommendations for \"{}\"", query);
    }

    let mut out = format!("Similar to \"{}\":\n", query);
    for (i, title) in titles.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, title));
    }
    out.trim_end().to_string()
}

/// Formats search matches as pretty JSON.
pub fn search_json(query: &str, titles: &[String]) -> String {
    to_json(&SearchOutput {
        query,
        matches: titles,
        count: titles.len(),
    })
}

/// Formats search matches for terminal display.
pub fn search_human(query: &str, titles: &[String]) -> String {
    if titles.is_empty() {
        return format!("No titles matching \"{}\"", query);
    }

    let mut out = format!(
        "{} title{} matching \"{}\":\n",
        titles.len(),
        if titles.len() == 1 { "" } else { "s" },
        query
    );
    for title in titles {
        out.push_str(&format!("  {}\n", title));
    }
    out.trim_end().to_string()
}

/// Formats a listing page as pretty JSON.
pub fn list_json(listing: &Listing) -> String {
    to_json(listing)
}

/// Formats a listing page for terminal display.
pub fn list_human(listing: &Listing) -> String {
    let mut out = format!(
        "Showing {} of {} titles:\n",
        listing.titles.len(),
        listing.total
    );
    for title in &listing.titles {
        out.push_str(&format!("  {}\n", title));
    }
    out.trim_end().to_string()
}

/// Formats engine health as pretty JSON.
pub fn health_json(health: &Health) -> String {
    to_json(health)
}

/// Formats engine health for terminal display.
pub fn health_human(health: &Health) -> String {
    if health.ready {
        format!("ready ({} titles)", health.item_count)
    } else {
        "not ready (artifact failed to load)".to_string()
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_human_numbers_results() {
        let titles = vec!["Batman Begins".to_string(), "Inception".to_string()];
        let out = recommend_human("The Dark Knight", &titles);
        assert!(out.contains("Similar to \"The Dark Knight\""));
        assert!(out.contains("1. Batman Begins"));
        assert!(out.contains("2. Inception"));
    }

    #[test]
    fn test_recommend_json_shape() {
        let titles = vec!["Batman Begins".to_string()];
        let out = recommend_json("The Dark Knight", &titles);
        assert!(out.contains("\"query\": \"The Dark Knight\""));
        assert!(out.contains("\"recommendations\""));
        assert!(out.contains("Batman Begins"));
    }

    #[test]
    fn test_search_human_empty() {
        let out = search_human("zzz", &[]);
        assert!(out.contains("No titles matching"));
    }

    #[test]
    fn test_search_json_includes_count() {
        let titles = vec!["Dark City".to_string()];
        let out = search_json("dark", &titles);
        assert!(out.contains("\"count\": 1"));
    }

    #[test]
    fn test_health_human_both_states() {
        let ready = Health {
            ready: true,
            item_count: 42,
        };
        assert_eq!(health_human(&ready), "ready (42 titles)");

        let down = Health {
            ready: false,
            item_count: 0,
        };
        assert!(health_human(&down).contains("not ready"));
    }

    #[test]
    fn test_list_human_shows_totals() {
        let listing = Listing {
            titles: vec!["A".to_string(), "B".to_string()],
            total: 5,
        };
        let out = list_human(&listing);
        assert!(out.contains("2 of 5"));
    }
}
