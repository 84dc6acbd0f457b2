// Core data structures for the uscout scanner

use serde::{Deserialize, Serialize};

/// Substitution slot expected in every platform URL template
pub const URL_SLOT: &str = "{}";

/// Heuristic for deciding presence from an HTTP response body
///
/// Presence is inferred when `text_absent` does NOT occur
/// (case-insensitively) in the response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Marker text whose absence signals an existing profile
    #[serde(alias = "absent")]
    pub text_absent: String,
}

/// A target site descriptor loaded from the platform registry
///
/// Immutable once handed to the scan engine. Names are unique within
/// a registry and case-normalized on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Unique platform name (trimmed, lowercase)
    pub name: String,

    /// Profile URL template containing exactly one `{}` slot
    #[serde(rename = "url")]
    pub url_template: String,

    /// Optional presence heuristic; `None` means status-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl Platform {
    /// Normalize the platform name in place
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_lowercase();
    }

    /// Substitute the identifier into the URL template
    ///
    /// The template is expected to carry exactly one slot; only the
    /// first occurrence is substituted.
    pub fn resolve_url(&self, identifier: &str) -> String {
        self.url_template.replacen(URL_SLOT, identifier, 1)
    }

    /// Count substitution slots in the URL template
    pub fn slot_count(&self) -> usize {
        self.url_template.matches(URL_SLOT).count()
    }
}

/// Outcome of one probe fetch after the retry policy ran its course
///
/// `status == None` signals total fetch failure with retries exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// HTTP status code of the final successful attempt
    pub status: Option<u16>,

    /// Response body of the final successful attempt
    pub body: Option<String>,
}

impl FetchOutcome {
    /// Outcome representing exhausted retries
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Immutable outcome of one (platform, identifier) probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub platform: String,
    pub username: String,
    pub found: bool,
    pub url: String,
}

/// Summary figures for one completed scan run
#[derive(Debug, Clone, Serialize)]
pub struct ScanStats {
    /// Number of platforms probed
    pub platforms: usize,

    /// Number of identifiers probed
    pub usernames: usize,

    /// Probes classified as present
    pub found: usize,

    /// Total probes completed
    pub total: usize,

    /// Wall-clock duration in seconds, formatted to one decimal
    pub duration: String,
}

impl ScanStats {
    /// Aggregate stats from a completed result set
    pub fn from_results(
        results: &[ScanResult],
        platforms: usize,
        usernames: usize,
        duration_secs: f64,
    ) -> Self {
        Self {
            platforms,
            usernames,
            found: results.iter().filter(|r| r.found).count(),
            total: results.len(),
            duration: format!("{duration_secs:.1}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_substitutes_once() {
        let platform = Platform {
            name: "github".to_string(),
            url_template: "https://github.com/{}".to_string(),
            validation: None,
        };
        assert_eq!(platform.resolve_url("alice"), "https://github.com/alice");
    }

    #[test]
    fn test_resolve_url_only_first_slot() {
        let platform = Platform {
            name: "x".to_string(),
            url_template: "https://x.com/{}/{}".to_string(),
            validation: None,
        };
        assert_eq!(platform.resolve_url("bob"), "https://x.com/bob/{}");
    }

    #[test]
    fn test_normalize_lowercases_and_trims() {
        let mut platform = Platform {
            name: "  GitHub ".to_string(),
            url_template: "https://github.com/{}".to_string(),
            validation: None,
        };
        platform.normalize();
        assert_eq!(platform.name, "github");
    }

    #[test]
    fn test_slot_count() {
        let platform = Platform {
            name: "x".to_string(),
            url_template: "https://x.com/profile".to_string(),
            validation: None,
        };
        assert_eq!(platform.slot_count(), 0);
    }

    #[test]
    fn test_validation_rule_accepts_absent_alias() {
        let rule: ValidationRule = serde_json::from_str(r#"{"absent": "not found"}"#).unwrap();
        assert_eq!(rule.text_absent, "not found");

        let rule: ValidationRule =
            serde_json::from_str(r#"{"text_absent": "no such user"}"#).unwrap();
        assert_eq!(rule.text_absent, "no such user");
    }

    #[test]
    fn test_platform_deserializes_without_validation() {
        let platform: Platform =
            serde_json::from_str(r#"{"name": "x", "url": "http://x/{}"}"#).unwrap();
        assert!(platform.validation.is_none());
    }

    #[test]
    fn test_stats_from_results() {
        let results = vec![
            ScanResult {
                platform: "a".into(),
                username: "u".into(),
                found: true,
                url: "http://a/u".into(),
            },
            ScanResult {
                platform: "b".into(),
                username: "u".into(),
                found: false,
                url: "http://b/u".into(),
            },
        ];
        let stats = ScanStats::from_results(&results, 2, 1, 1.234);
        assert_eq!(stats.found, 1);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.duration, "1.2");
    }
}
