//! Typed rule tables, as handed to the core per "generate" call.
//!
//! All of these are plain data the UI layer (here: the rules file) has
//! already parsed. Rows that are incomplete (missing keywords, missing
//! content, missing numeric bounds) are not errors; the generators and the
//! analyzer silently skip them via the `usable` helpers below.

use serde::{Deserialize, Serialize};

/// Lowercase, trim, and drop blank keywords. Duplicates are kept: the
/// analyzer records each occurrence separately.
pub fn normalize_keywords(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Keyword-triggered content, used by Tone (and mirrored by other modules'
/// keyword tables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub content: String,
}

impl KeywordRule {
    /// Normalized keywords plus trimmed content, or `None` for an
    /// incomplete row.
    pub fn usable(&self) -> Option<(Vec<String>, &str)> {
        let keywords = normalize_keywords(&self.keywords);
        let content = self.content.trim();
        if keywords.is_empty() || content.is_empty() {
            None
        } else {
            Some((keywords, content))
        }
    }
}

/// Lorebook category. Scan order is the declaration order here:
/// people, places, objects, moods, events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoreCategory {
    People,
    Places,
    Objects,
    Moods,
    Events,
}

impl LoreCategory {
    pub const ALL: [LoreCategory; 5] = [
        LoreCategory::People,
        LoreCategory::Places,
        LoreCategory::Objects,
        LoreCategory::Moods,
        LoreCategory::Events,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LoreCategory::People => "people",
            LoreCategory::Places => "places",
            LoreCategory::Objects => "objects",
            LoreCategory::Moods => "moods",
            LoreCategory::Events => "events",
        }
    }
}

/// One lorebook entry: keywords that inject `content` into the scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoreEntry {
    pub category: LoreCategory,
    pub keywords: Vec<String>,
    pub content: String,
}

/// Message-count window for the pacing module. `min <= max` is expected but
/// not validated; the generated comparison simply never matches otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeRule {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub content: String,
}

impl RangeRule {
    pub fn usable(&self) -> Option<(i64, i64, &str)> {
        let content = self.content.trim();
        match (self.min, self.max) {
            (Some(min), Some(max)) if !content.is_empty() => Some((min, max, content)),
            _ => None,
        }
    }
}

/// One-time pacing event at an exact message number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExactTrigger {
    pub message_number: Option<i64>,
    pub content: String,
}

impl ExactTrigger {
    pub fn usable(&self) -> Option<(i64, &str)> {
        let content = self.content.trim();
        match self.message_number {
            Some(n) if !content.is_empty() => Some((n, content)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingRules {
    #[serde(default)]
    pub phases: Vec<RangeRule>,
    #[serde(default)]
    pub events: Vec<ExactTrigger>,
}

/// Hour window, 0-23. `start > end` wraps past midnight: 22-4 covers
/// hours 22, 23, 0, 1, 2, 3, 4.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub content: String,
}

impl HourRange {
    pub fn usable(&self) -> Option<(i64, i64, &str)> {
        let content = self.content.trim();
        match (self.start, self.end) {
            (Some(start), Some(end)) if !content.is_empty() => Some((start, end, content)),
            _ => None,
        }
    }
}

/// Ambient flavor event. A missing probability falls back to the
/// module-wide default in `GenOptions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmbientEvent {
    pub content: String,
    pub probability: Option<u8>,
}

impl AmbientEvent {
    pub fn usable(&self) -> Option<&str> {
        let content = self.content.trim();
        if content.is_empty() {
            None
        } else {
            Some(content)
        }
    }
}

/// Random-reaction event: a single trigger phrase and pipe-separated
/// responses, one of which is picked uniformly at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomEvent {
    pub trigger: String,
    pub responses: Vec<String>,
}

impl RandomEvent {
    pub fn usable(&self) -> Option<(String, Vec<String>)> {
        let trigger = self.trigger.trim().to_lowercase();
        let responses: Vec<String> = self
            .responses
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if trigger.is_empty() || responses.is_empty() {
            None
        } else {
            Some((trigger, responses))
        }
    }

    /// Split a raw `option1|option2|option3` string into a response list.
    pub fn split_responses(raw: &str) -> Vec<String> {
        raw.split('|')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }
}

/// Conjunction rule: keywords OR-ed together, AND-ed with whichever numeric
/// sub-conditions are present. Absent fields are elided from the generated
/// boolean expression entirely; the hour conjunct needs both bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinedRule {
    pub keywords: Vec<String>,
    pub min_hour: Option<i64>,
    pub max_hour: Option<i64>,
    pub min_messages: Option<i64>,
    pub result: String,
}

impl CombinedRule {
    pub fn usable(&self) -> Option<(Vec<String>, &str)> {
        let keywords = normalize_keywords(&self.keywords);
        let result = self.result.trim();
        if keywords.is_empty() || result.is_empty() {
            None
        } else {
            Some((keywords, result))
        }
    }

    pub fn hour_window(&self) -> Option<(i64, i64)> {
        match (self.min_hour, self.max_hour) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// Comparison operator for score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOp {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
}

impl ScoreOp {
    pub fn as_code(&self) -> &'static str {
        match self {
            ScoreOp::Ge => ">=",
            ScoreOp::Le => "<=",
            ScoreOp::Eq => "==",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreThreshold {
    pub op: ScoreOp,
    pub value: Option<i64>,
    pub response: String,
}

impl ScoreThreshold {
    pub fn usable(&self) -> Option<(ScoreOp, i64, &str)> {
        let response = self.response.trim();
        match self.value {
            Some(value) if !response.is_empty() => Some((self.op, value, response)),
            _ => None,
        }
    }
}

/// Stateless recomputes the score each turn; persistent carries it across
/// turns via a `{{char_score:N}}` marker embedded in the scenario text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Stateless,
    Persistent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub thresholds: Vec<ScoreThreshold>,
}

/// Memory module configuration: optional name capture plus three
/// independent keyword categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub name_phrase: String,
    #[serde(default)]
    pub facts_keywords: Vec<String>,
    #[serde(default)]
    pub likes_keywords: Vec<String>,
    #[serde(default)]
    pub dislikes_keywords: Vec<String>,
}

/// Every module's rule table, immutable per generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub lorebook: Vec<LoreEntry>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub pacing: PacingRules,
    #[serde(default)]
    pub tone: Vec<KeywordRule>,
    #[serde(default)]
    pub time: Vec<HourRange>,
    #[serde(default)]
    pub ambient: Vec<AmbientEvent>,
    #[serde(default)]
    pub random: Vec<RandomEvent>,
    #[serde(default)]
    pub combined: Vec<CombinedRule>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keywords_trims_and_lowercases() {
        let raw = vec![" Cat ".to_string(), "".to_string(), "DOG".to_string()];
        assert_eq!(normalize_keywords(&raw), vec!["cat", "dog"]);
    }

    #[test]
    fn test_keyword_rule_incomplete_rows_excluded() {
        let no_content = KeywordRule {
            keywords: vec!["cat".into()],
            content: "   ".into(),
        };
        assert!(no_content.usable().is_none());

        let no_keywords = KeywordRule {
            keywords: vec!["  ".into()],
            content: "something".into(),
        };
        assert!(no_keywords.usable().is_none());
    }

    #[test]
    fn test_range_rule_requires_both_bounds() {
        let rule = RangeRule {
            min: Some(1),
            max: None,
            content: "x".into(),
        };
        assert!(rule.usable().is_none());
        let ok = RangeRule {
            min: Some(1),
            max: Some(5),
            content: "x".into(),
        };
        assert_eq!(ok.usable(), Some((1, 5, "x")));
    }

    #[test]
    fn test_combined_rule_hour_window_needs_both_bounds() {
        let rule = CombinedRule {
            keywords: vec!["night".into()],
            min_hour: Some(22),
            max_hour: None,
            min_messages: Some(3),
            result: "r".into(),
        };
        assert!(rule.hour_window().is_none());
        assert!(rule.usable().is_some());
    }

    #[test]
    fn test_random_split_responses() {
        assert_eq!(
            RandomEvent::split_responses("I agree| I disagree ||Maybe"),
            vec!["I agree", "I disagree", "Maybe"]
        );
    }
}
