//! Tests for loading rules project files from disk and feeding them
//! through the generation pipeline.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use scriptforge::codegen;
use scriptforge::models::{Module, RulesFile, ScoringMode};

fn write_rules(toml_text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(toml_text.as_bytes()).expect("write rules");
    file
}

#[test]
fn test_starter_file_round_trips_from_disk() {
    let starter = RulesFile::starter_toml().unwrap();
    let file = write_rules(&starter);
    let loaded = RulesFile::load(file.path()).unwrap();

    assert_eq!(loaded.rules.memory.name_phrase, "my name is");
    assert_eq!(
        loaded.rules.scoring.positive,
        vec!["love", "great", "wonderful", "amazing"]
    );
    let order = loaded.module_order();
    assert!(order.is_enabled(Module::Lorebook));
    assert!(order.is_enabled(Module::Memory));
    assert!(!order.is_enabled(Module::Ambient));
}

#[test]
fn test_full_project_generates_combined_script() {
    let file = write_rules(
        r#"
[options]
debug_mode = false
ambient_probability = 20
time_offset = -5

[modules]
order = ["tone", "time"]
enabled = ["tone", "time"]

[[rules.tone]]
keywords = ["angry", "furious"]
content = "Responds with calm."

[[rules.time]]
start = 22
end = 4
content = "It is deep night."
"#,
    );
    let loaded = RulesFile::load(file.path()).unwrap();
    assert_eq!(loaded.options.time_offset, -5);
    assert_eq!(loaded.options.ambient_probability, 20);

    let combined = codegen::combine(
        &loaded.module_order(),
        &loaded.rules,
        &loaded.options,
    )
    .unwrap();
    assert_eq!(combined.active_modules, 2);
    assert!(combined.text.contains("// ========== TONE MODULE =========="));
    assert!(combined.text.contains("var offset = -5;"));
    assert!(combined.text.contains("Responds with calm."));
}

#[test]
fn test_scoring_mode_parses_from_toml() {
    let file = write_rules(
        r#"
[rules.scoring]
mode = "persistent"
positive = ["love"]
"#,
    );
    let loaded = RulesFile::load(file.path()).unwrap();
    assert_eq!(loaded.rules.scoring.mode, ScoringMode::Persistent);
}

#[test]
fn test_threshold_operators_parse_from_toml() {
    let file = write_rules(
        r#"
[rules.scoring]
positive = ["love"]

[[rules.scoring.thresholds]]
op = ">="
value = 2
response = "warm"

[[rules.scoring.thresholds]]
op = "=="
value = 0
response = "neutral"
"#,
    );
    let loaded = RulesFile::load(file.path()).unwrap();
    assert_eq!(loaded.rules.scoring.thresholds.len(), 2);
    let script =
        codegen::generate_standalone(Module::Scoring, &loaded.rules, &loaded.options);
    assert!(script.contains("if (score >= 2) {"));
    assert!(script.contains("if (score == 0) {"));
}

#[test]
fn test_malformed_toml_is_a_rules_error() {
    let file = write_rules("this is not toml [");
    let err = RulesFile::load(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Rules error:"));
}

#[test]
fn test_missing_file_is_a_rules_error() {
    let err = RulesFile::load(std::path::Path::new("/nonexistent/rules.toml")).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}

#[test]
fn test_incomplete_rows_load_but_do_not_generate() {
    // A pacing phase without a max bound is kept in the model but excluded
    // from generation
    let file = write_rules(
        r#"
[modules]
enabled = ["pacing"]

[[rules.pacing.phases]]
min = 1
content = "early days"

[[rules.pacing.phases]]
min = 1
max = 10
content = "the real phase"
"#,
    );
    let loaded = RulesFile::load(file.path()).unwrap();
    assert_eq!(loaded.rules.pacing.phases.len(), 2);
    let script = codegen::generate_standalone(Module::Pacing, &loaded.rules, &loaded.options);
    assert!(!script.contains("early days"));
    assert!(script.contains("the real phase"));
}
