//! Shared snippets of generated runtime code, plus a native mirror of the
//! `hourInRange` helper for testing the wrap-around rule without a script
//! engine.

/// Context initializer emitted once per script (per fragment in standalone
/// mode, once up front in combined mode).
pub const INIT_CONTEXT_FN: &str = "function initContext() {\n  if (!context.character) context.character = {};\n  if (!context.character.personality) context.character.personality = \"\";\n  if (!context.character.scenario) context.character.scenario = \"\";\n}\n";

/// Wrap-around hour matcher. `start > end` spans through hour 0.
pub const HOUR_IN_RANGE_FN: &str = "function hourInRange(h, start, end) {\n  return start <= end ? (h >= start && h <= end) : (h >= start || h <= end);\n}\n";

/// Safe message-counter alias: missing or non-numeric `message_count`
/// reads as 0.
pub fn message_count_alias(comment: &str) -> String {
    format!(
        "// {}\nvar message_count = (context.chat && typeof context.chat.message_count === 'number')\n  ? context.chat.message_count\n  : 0;\n\n",
        comment
    )
}

/// Safe accessor for the last user message, emitted at the top of every
/// message-reading fragment body.
pub const GET_MESSAGE: &str = "// Get last user message safely\nvar message = (context.chat && context.chat.last_message) ? context.chat.last_message : \"\";\n";

/// Native mirror of the generated `hourInRange` helper.
pub fn hour_in_range(h: i64, start: i64, end: i64) -> bool {
    if start <= end {
        h >= start && h <= end
    } else {
        h >= start || h <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_range() {
        assert!(hour_in_range(9, 9, 17));
        assert!(hour_in_range(17, 9, 17));
        assert!(!hour_in_range(18, 9, 17));
        assert!(!hour_in_range(8, 9, 17));
    }

    #[test]
    fn test_wraparound_range() {
        // 22-4 covers 22, 23, 0, 1, 2, 3, 4
        for h in [22, 23, 0, 1, 2, 3, 4] {
            assert!(hour_in_range(h, 22, 4), "hour {h} should match 22-4");
        }
        for h in 5..22 {
            assert!(!hour_in_range(h, 22, 4), "hour {h} should not match 22-4");
        }
    }

    #[test]
    fn test_exhaustive_wraparound_law() {
        // The definitional property over the whole 0..23 cube.
        for h in 0..24 {
            for start in 0..24 {
                for end in 0..24 {
                    let expected = if start <= end {
                        start <= h && h <= end
                    } else {
                        h >= start || h <= end
                    };
                    assert_eq!(
                        hour_in_range(h, start, end),
                        expected,
                        "h={h} start={start} end={end}"
                    );
                }
            }
        }
    }
}
