// SPDX-License-Identifier: MIT

//! Turns a mission goal into a routine name: lowercase, non-alphanumeric
//! runs collapsed to a single underscore, trimmed, capped at 60 chars.

use regex::Regex;
use std::sync::OnceLock;

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"[^a-z0-9]+").unwrap()
    })
}

pub fn slugify(goal: &str) -> String {
    let lower = goal.to_lowercase();
    let collapsed = non_alphanumeric().replace_all(&lower, "_");
    let trimmed = collapsed.trim_matches('_');
    trimmed.chars().take(60).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_collapses_punctuation() {
        assert_eq!(slugify("Fetch the Weather, Then Report!"), "fetch_the_weather_then_report");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_underscores() {
        assert_eq!(slugify("  ---hello---  "), "hello");
    }

    #[test]
    fn slugify_truncates_to_sixty_chars() {
        let goal = "a".repeat(100);
        assert_eq!(slugify(&goal).len(), 60);
    }
}
