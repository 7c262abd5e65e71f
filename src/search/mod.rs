//! Search strategies for filtering completion candidates
//!
//! A search strategy is a pure function of `(token, candidates)` that
//! returns the ordered subset of candidates the token could complete to.
//! Strategies never reorder beyond filtering and are total: empty input or
//! zero matches produce an empty list, never an error.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RulelineError};

/// Named candidate-filtering strategies.
///
/// Every mission carries one of these (or inherits the process-wide
/// default). `Off` turns filtering off entirely for missions whose action
/// already returns the final list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Case-sensitive prefix match.
    Normal,

    /// Case-insensitive prefix match.
    IgnoreCase,

    /// `_` in the token acts as a chunk separator: `fo_ba` completes
    /// `foo_bar` by prefix-matching each underscore-delimited chunk.
    Underscore,

    /// Token may match a substring anywhere in the candidate.
    Anywhere,

    /// Candidates are filesystem paths; segment-aware matching with
    /// hidden-entry rules (`.`-entries only match a `.`-token).
    Files,

    /// Candidates are `::`-namespaced identifiers; leading segments match
    /// exactly, the final segment by prefix.
    Modules,

    /// Pass-through: the action is responsible for filtering.
    Off,
}

impl SearchStrategy {
    /// Apply this strategy to a raw candidate list.
    pub fn filter(&self, token: &str, candidates: &[String]) -> Vec<String> {
        match self {
            SearchStrategy::Normal => normal(token, candidates),
            SearchStrategy::IgnoreCase => ignore_case(token, candidates),
            SearchStrategy::Underscore => underscore(token, candidates),
            SearchStrategy::Anywhere => anywhere(token, candidates),
            SearchStrategy::Files => files(token, candidates),
            SearchStrategy::Modules => modules(token, candidates),
            SearchStrategy::Off => candidates.to_vec(),
        }
    }

    /// Strategy name as used in config files and registration options.
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Normal => "normal",
            SearchStrategy::IgnoreCase => "ignore_case",
            SearchStrategy::Underscore => "underscore",
            SearchStrategy::Anywhere => "anywhere",
            SearchStrategy::Files => "files",
            SearchStrategy::Modules => "modules",
            SearchStrategy::Off => "off",
        }
    }
}

impl std::str::FromStr for SearchStrategy {
    type Err = RulelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(SearchStrategy::Normal),
            "ignore_case" => Ok(SearchStrategy::IgnoreCase),
            "underscore" => Ok(SearchStrategy::Underscore),
            "anywhere" => Ok(SearchStrategy::Anywhere),
            "files" => Ok(SearchStrategy::Files),
            "modules" => Ok(SearchStrategy::Modules),
            "off" | "false" => Ok(SearchStrategy::Off),
            _ => Err(ConfigError::InvalidValue {
                field: "search".to_string(),
                value: s.to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-sensitive prefix filter.
pub fn normal(token: &str, candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| c.starts_with(token))
        .cloned()
        .collect()
}

/// Case-insensitive prefix filter.
pub fn ignore_case(token: &str, candidates: &[String]) -> Vec<String> {
    let token = token.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&token))
        .cloned()
        .collect()
}

/// Underscore-shorthand filter.
///
/// A token without `_` degrades to [`normal`]. Otherwise each
/// underscore-delimited chunk of the token must be a prefix of the
/// candidate's chunk at the same position, so `fo_ba` completes both
/// `foo_bar` and `foo_baz`.
pub fn underscore(token: &str, candidates: &[String]) -> Vec<String> {
    if !token.contains('_') {
        return normal(token, candidates);
    }
    let chunks: Vec<&str> = token.split('_').collect();
    candidates
        .iter()
        .filter(|c| {
            let cand: Vec<&str> = c.split('_').collect();
            chunks.len() <= cand.len()
                && chunks.iter().zip(&cand).all(|(t, c)| c.starts_with(t))
        })
        .cloned()
        .collect()
}

/// Substring filter: the token may occur anywhere in the candidate.
pub fn anywhere(token: &str, candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| c.contains(token))
        .cloned()
        .collect()
}

/// Path filter: segment-aware prefix matching on `/`-separated paths.
///
/// Hidden entries (a segment starting with `.`) only match when the
/// token's segment also starts with `.`.
pub fn files(token: &str, candidates: &[String]) -> Vec<String> {
    segment_filter(token, candidates, "/", true)
}

/// Namespace filter: segment-aware prefix matching on `::`-separated
/// identifiers. Leading segments must match exactly, the last by prefix.
pub fn modules(token: &str, candidates: &[String]) -> Vec<String> {
    segment_filter(token, candidates, "::", false)
}

/// Shared segment-wise filter behind [`files`] and [`modules`].
///
/// The token is split on `sep`; all but its last segment must equal the
/// candidate's corresponding segments, and the last is a prefix of the
/// candidate segment at that index. Candidates may extend deeper.
fn segment_filter(token: &str, candidates: &[String], sep: &str, hidden_rule: bool) -> Vec<String> {
    let parts: Vec<&str> = token.split(sep).collect();
    let last = parts.len() - 1;
    candidates
        .iter()
        .filter(|cand| {
            let cparts: Vec<&str> = cand.split(sep).collect();
            if cparts.len() <= last {
                return false;
            }
            if cparts[..last] != parts[..last] {
                return false;
            }
            let seg = cparts[last];
            if !seg.starts_with(parts[last]) {
                return false;
            }
            // hidden entries need an explicit leading dot in the token
            !(hidden_rule && seg.starts_with('.') && !parts[last].starts_with('.'))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normal_prefix() {
        let got = normal("fo", &list(&["foo", "bar", "food"]));
        assert_eq!(got, list(&["foo", "food"]));
    }

    #[test]
    fn test_normal_preserves_order() {
        let got = normal("f", &list(&["fz", "fa", "fm"]));
        assert_eq!(got, list(&["fz", "fa", "fm"]));
    }

    #[test]
    fn test_ignore_case() {
        let got = ignore_case("FO", &list(&["foo", "Food", "bar"]));
        assert_eq!(got, list(&["foo", "Food"]));
    }

    #[test]
    fn test_underscore_shorthand() {
        let got = underscore("fo_ba", &list(&["foo_bar", "foo_baz", "other"]));
        assert_eq!(got, list(&["foo_bar", "foo_baz"]));
    }

    #[test]
    fn test_underscore_without_underscore_is_prefix() {
        let got = underscore("fo", &list(&["foo_bar", "bar_foo"]));
        assert_eq!(got, list(&["foo_bar"]));
    }

    #[test]
    fn test_underscore_matches_deeper_candidates() {
        let got = underscore("f_b", &list(&["foo_bar_baz", "foo"]));
        assert_eq!(got, list(&["foo_bar_baz"]));
    }

    #[test]
    fn test_anywhere_substring() {
        let got = anywhere("oo", &list(&["foo", "book", "bar"]));
        assert_eq!(got, list(&["foo", "book"]));
    }

    #[test]
    fn test_files_basename_prefix() {
        let got = files("src/ma", &list(&["src/main.rs", "src/lib.rs", "tests/ma.rs"]));
        assert_eq!(got, list(&["src/main.rs"]));
    }

    #[test]
    fn test_files_hides_dot_entries() {
        let got = files("", &list(&[".git", "src", ".cargo"]));
        assert_eq!(got, list(&["src"]));
    }

    #[test]
    fn test_files_dot_token_shows_hidden() {
        let got = files(".", &list(&[".git", "src", ".cargo"]));
        assert_eq!(got, list(&[".git", ".cargo"]));
    }

    #[test]
    fn test_files_first_segment_prefix() {
        let got = files("sr", &list(&["src/main.rs", "srv", "doc"]));
        assert_eq!(got, list(&["src/main.rs", "srv"]));
    }

    #[test]
    fn test_modules_exact_leading_segments() {
        let got = modules(
            "Net::HT",
            &list(&["Net::HTTP", "Net::HTTPS", "NetPlus::HTTP"]),
        );
        assert_eq!(got, list(&["Net::HTTP", "Net::HTTPS"]));
    }

    #[test]
    fn test_modules_single_segment() {
        let got = modules("Ne", &list(&["Net::HTTP", "Net", "Other"]));
        assert_eq!(got, list(&["Net::HTTP", "Net"]));
    }

    #[test]
    fn test_off_passthrough() {
        let all = list(&["a", "b"]);
        assert_eq!(SearchStrategy::Off.filter("zzz", &all), all);
    }

    #[test]
    fn test_total_on_empty_inputs() {
        assert!(normal("x", &[]).is_empty());
        assert!(underscore("a_b", &[]).is_empty());
        assert!(files("x", &list(&[""])).is_empty());
        assert_eq!(anywhere("", &list(&["a"])), list(&["a"]));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "underscore".parse::<SearchStrategy>().ok(),
            Some(SearchStrategy::Underscore)
        );
        assert_eq!(
            "false".parse::<SearchStrategy>().ok(),
            Some(SearchStrategy::Off)
        );
        assert!("fuzzy".parse::<SearchStrategy>().is_err());
    }
}
