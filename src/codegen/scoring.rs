//! Scoring generator: per-turn sentiment score with threshold responses.
//!
//! Stateless mode recomputes the score from zero each turn. Persistent
//! mode reads the previous score from a `{{char_score:N}}` marker embedded
//! in the scenario, applies the turn's delta, and rewrites the marker
//! (replace if present, append if not). Thresholds are independent and run
//! in declaration order with no early exit.

use crate::models::{normalize_keywords, GenOptions, Module, ScoreOp, ScoringConfig, ScoringMode};
use crate::utils::escape::{escape_for_script_literal, js_quote};

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

pub fn build(config: &ScoringConfig, opts: &GenOptions) -> Fragment {
    let positive = normalize_keywords(&config.positive);
    let negative = normalize_keywords(&config.negative);
    let thresholds: Vec<(ScoreOp, i64, &str)> = config
        .thresholds
        .iter()
        .filter_map(|t| t.usable())
        .collect();

    if positive.is_empty() && negative.is_empty() && thresholds.is_empty() {
        return Fragment::noop(Module::Scoring);
    }

    let mode_label = match config.mode {
        ScoringMode::Stateless => "STATELESS",
        ScoringMode::Persistent => "PERSISTENT",
    };
    let title = format!("{} ({})", Module::Scoring.banner(), mode_label);

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.blank();

    match config.mode {
        ScoringMode::Persistent => {
            b.line("// EXPERIMENTAL: Persistent scoring via {{char}} tags");
            b.line("// WARNING: Fragile and may break with platform updates");
            b.blank();
            b.line("var scoreMatch = context.character.scenario.match(/\\{\\{char_score:([-\\d]+)\\}\\}/);");
            b.line("var score = scoreMatch ? parseInt(scoreMatch[1], 10) : 0;");
            b.blank();
        }
        ScoringMode::Stateless => {
            b.line("// Stateless: Single-turn sentiment analysis");
            b.line("var score = 0;");
            b.blank();
        }
    }

    b.line("var msgLower = message.toLowerCase();");
    b.blank();

    if !positive.is_empty() {
        b.line("// Positive keywords");
        b.line(&format!("var positiveKeywords = [{}];", quote_list(&positive)));
        b.line("for (var i = 0; i < positiveKeywords.length; i++) {");
        b.line("  if (msgLower.indexOf(positiveKeywords[i]) !== -1) {");
        b.line("    score += 1;");
        b.line("  }");
        b.line("}");
        b.blank();
    }

    if !negative.is_empty() {
        b.line("// Negative keywords");
        b.line(&format!("var negativeKeywords = [{}];", quote_list(&negative)));
        b.line("for (var i = 0; i < negativeKeywords.length; i++) {");
        b.line("  if (msgLower.indexOf(negativeKeywords[i]) !== -1) {");
        b.line("    score -= 1;");
        b.line("  }");
        b.line("}");
        b.blank();
    }

    if config.mode == ScoringMode::Persistent {
        b.line("// Update score tag");
        b.line("if (scoreMatch) {");
        b.line("  context.character.scenario = context.character.scenario.replace(/\\{\\{char_score:[-\\d]+\\}\\}/, '{{char_score:' + score + '}}');");
        b.line("} else {");
        b.line("  context.character.scenario += '\\n{{char_score:' + score + '}}';");
        b.line("}");
        b.blank();
    }

    for (op, value, response) in &thresholds {
        b.line(&format!("if (score {} {}) {{", op.as_code(), value));
        b.line(&format!(
            "  context.character.personality += '\\n{}';",
            escape_for_script_literal(response)
        ));
        b.line("}");
    }

    if opts.debug_mode {
        b.blank();
        b.line("context.character.scenario += '\\n(debug: scoring module fired, score=' + score + ')';");
    }

    Fragment::with_title(Module::Scoring, title, b.finish())
}

fn quote_list(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| js_quote(k))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreThreshold;

    fn config(positive: &[&str], negative: &[&str]) -> ScoringConfig {
        ScoringConfig {
            mode: ScoringMode::Stateless,
            positive: positive.iter().map(|k| k.to_string()).collect(),
            negative: negative.iter().map(|k| k.to_string()).collect(),
            thresholds: vec![],
        }
    }

    #[test]
    fn test_empty_config_is_noop() {
        assert!(build(&ScoringConfig::default(), &GenOptions::default()).is_noop());
    }

    #[test]
    fn test_stateless_starts_from_zero() {
        let frag = build(&config(&["love"], &["hate"]), &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("var score = 0;"));
        assert!(!body.contains("char_score"));
        assert!(body.contains("var positiveKeywords = ['love'];"));
        assert!(body.contains("var negativeKeywords = ['hate'];"));
    }

    #[test]
    fn test_persistent_reads_and_rewrites_marker() {
        let mut cfg = config(&["love"], &[]);
        cfg.mode = ScoringMode::Persistent;
        let frag = build(&cfg, &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("match(/\\{\\{char_score:([-\\d]+)\\}\\}/)"));
        assert!(body.contains("'{{char_score:' + score + '}}'"));
        assert!(body.contains("context.character.scenario += '\\n{{char_score:' + score + '}}';"));
    }

    #[test]
    fn test_mode_shows_in_header() {
        let frag = build(&config(&["love"], &[]), &GenOptions::default());
        assert!(frag.standalone().contains("// MODULE: SCORING ENGINE (STATELESS)"));

        let mut cfg = config(&["love"], &[]);
        cfg.mode = ScoringMode::Persistent;
        let frag = build(&cfg, &GenOptions::default());
        assert!(frag.standalone().contains("// MODULE: SCORING ENGINE (PERSISTENT)"));
    }

    #[test]
    fn test_thresholds_run_independently_in_order() {
        let mut cfg = config(&["love"], &["hate"]);
        cfg.thresholds = vec![
            ScoreThreshold {
                op: ScoreOp::Eq,
                value: Some(0),
                response: "neutral".into(),
            },
            ScoreThreshold {
                op: ScoreOp::Ge,
                value: Some(1),
                response: "warm".into(),
            },
            ScoreThreshold {
                op: ScoreOp::Le,
                value: None,
                response: "dropped".into(),
            },
        ];
        let frag = build(&cfg, &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("if (score == 0) {"));
        assert!(body.contains("if (score >= 1) {"));
        assert!(!body.contains("dropped"), "threshold without a value is excluded");
        assert!(!body.contains("else if"));
    }
}
