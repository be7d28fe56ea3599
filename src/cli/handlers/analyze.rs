//! Handler for `scriptforge analyze`.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::analyzer::{self, KeywordIssue};
use crate::cli::output::{output_json, print_heading, print_success, print_table, OutputMode};
use crate::models::RulesFile;

pub fn handle_analyze(rules_path: &Path, mode: OutputMode) -> Result<()> {
    let file = RulesFile::load(rules_path)?;
    let report = analyzer::analyze(&file.module_order(), &file.rules);

    if mode == OutputMode::Json {
        output_json(&report);
        return Ok(());
    }

    println!(
        "Total keywords: {}   Conflicts: {}   Multi-triggers: {}   Overlaps: {}",
        report.total_keywords.to_string().bold(),
        report.conflicts.len().to_string().bold(),
        report.multi_triggers.len().to_string().bold(),
        report.overlaps.len().to_string().bold(),
    );

    if !report.conflicts.is_empty() {
        print_heading("Conflicts (same keyword with opposing effects)");
        print_issue_table(&report.conflicts);
    }

    if !report.multi_triggers.is_empty() {
        print_heading("Multi-triggers (keywords that fire multiple things)");
        print_issue_table(&report.multi_triggers);
    }

    if !report.overlaps.is_empty() {
        print_heading("Overlapping keywords (may match inside each other)");
        for overlap in &report.overlaps {
            println!("  {}", overlap.note);
        }
    }

    if report.is_empty() {
        println!(
            "{}",
            "No triggers configured yet. Add keywords to your modules to analyze them.".dimmed()
        );
    } else if report.is_all_clear() {
        print_success(&format!(
            "All clear: no conflicts or overlaps in {} keywords",
            report.total_keywords
        ));
    }

    Ok(())
}

fn print_issue_table(issues: &[KeywordIssue]) {
    let rows: Vec<Vec<String>> = issues
        .iter()
        .flat_map(|issue| {
            issue.usages.iter().map(|usage| {
                vec![
                    format!("\"{}\"", issue.keyword),
                    usage.module.to_string(),
                    usage.context.clone(),
                    usage.action.clone(),
                ]
            })
        })
        .collect();
    print_table(&["Keyword", "Module", "Context", "Action"], rows);
}
