//! Static trigger analyzer: cross-module keyword scan.
//!
//! Works on the rule tables themselves, never on generated code. Every
//! keyword occurrence in an enabled module is recorded as a usage; the
//! report then classifies keywords into scoring conflicts, multi-triggers,
//! and substring overlaps. Overlaps matter because substring matching fires
//! "cat" inside "category"; padded matching avoids that but has blind spots
//! of its own, so the analyzer flags the pair either way.

use serde::Serialize;
use tracing::info;

use crate::models::{normalize_keywords, Module, ModuleOrder, RuleSet};
use crate::utils::text::preview;

const ACTION_PREVIEW_CHARS: usize = 40;

/// One place a keyword is referenced: which module, in what role, and what
/// firing it does.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerUsage {
    pub module: Module,
    pub context: String,
    pub action: String,
}

/// A keyword together with every usage that references it.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordIssue {
    pub keyword: String,
    pub usages: Vec<TriggerUsage>,
}

/// Unordered pair of distinct keywords where one contains the other.
#[derive(Debug, Clone, Serialize)]
pub struct Overlap {
    pub keywords: [String; 2],
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerReport {
    pub total_keywords: usize,
    pub conflicts: Vec<KeywordIssue>,
    pub multi_triggers: Vec<KeywordIssue>,
    pub overlaps: Vec<Overlap>,
}

impl TriggerReport {
    /// Keywords exist and none of them raised an issue.
    pub fn is_all_clear(&self) -> bool {
        self.total_keywords > 0 && !self.has_findings()
    }

    /// No keywords configured in any enabled module.
    pub fn is_empty(&self) -> bool {
        self.total_keywords == 0
    }

    pub fn has_findings(&self) -> bool {
        !self.conflicts.is_empty() || !self.multi_triggers.is_empty() || !self.overlaps.is_empty()
    }
}

/// Keyword-to-usages map preserving first-seen keyword order, so the report
/// lists findings in the order rules were declared.
#[derive(Default)]
struct TriggerMap {
    entries: Vec<(String, Vec<TriggerUsage>)>,
}

impl TriggerMap {
    fn record(&mut self, keyword: &str, module: Module, context: &str, action: String) {
        let usage = TriggerUsage {
            module,
            context: context.to_string(),
            action,
        };
        match self.entries.iter_mut().find(|(k, _)| k == keyword) {
            Some((_, usages)) => usages.push(usage),
            None => self.entries.push((keyword.to_string(), vec![usage])),
        }
    }
}

/// Scan every enabled module's rule table and build the report.
pub fn analyze(order: &ModuleOrder, rules: &RuleSet) -> TriggerReport {
    let mut map = TriggerMap::default();

    if order.is_enabled(Module::Lorebook) {
        for entry in &rules.lorebook {
            let content = entry.content.trim();
            if content.is_empty() {
                continue;
            }
            let action = format!(
                "Injects lore entry ({})",
                preview(content, ACTION_PREVIEW_CHARS)
            );
            for kw in normalize_keywords(&entry.keywords) {
                map.record(&kw, Module::Lorebook, entry.category.name(), action.clone());
            }
        }
    }

    if order.is_enabled(Module::Tone) {
        for rule in &rules.tone {
            if let Some((keywords, content)) = rule.usable() {
                let action = format!("Adds: {}", preview(content, ACTION_PREVIEW_CHARS));
                for kw in keywords {
                    map.record(&kw, Module::Tone, "personality shift", action.clone());
                }
            }
        }
    }

    if order.is_enabled(Module::Scoring) {
        for kw in normalize_keywords(&rules.scoring.positive) {
            map.record(&kw, Module::Scoring, "positive", "Adds +1 to score".into());
        }
        for kw in normalize_keywords(&rules.scoring.negative) {
            map.record(
                &kw,
                Module::Scoring,
                "negative",
                "Subtracts -1 from score".into(),
            );
        }
    }

    if order.is_enabled(Module::Memory) {
        let memory = &rules.memory;
        let categories = [
            (&memory.facts_keywords, "facts detection", "Triggers fact storage"),
            (&memory.likes_keywords, "likes detection", "Triggers like storage"),
            (
                &memory.dislikes_keywords,
                "dislikes detection",
                "Triggers dislike storage",
            ),
        ];
        for (keywords, context, action) in categories {
            for kw in normalize_keywords(keywords) {
                map.record(&kw, Module::Memory, context, action.to_string());
            }
        }
    }

    if order.is_enabled(Module::Random) {
        for event in &rules.random {
            if let Some((trigger, responses)) = event.usable() {
                let action = format!("Picks one of {} responses", responses.len());
                map.record(&trigger, Module::Random, "message trigger", action);
            }
        }
    }

    if order.is_enabled(Module::Combined) {
        for (index, rule) in rules.combined.iter().enumerate() {
            if let Some((keywords, result)) = rule.usable() {
                let context = format!("rule {}", index + 1);
                let action = format!("Adds: {}", preview(result, ACTION_PREVIEW_CHARS));
                for kw in keywords {
                    map.record(&kw, Module::Combined, &context, action.clone());
                }
            }
        }
    }

    let report = classify(map);
    info!(
        keywords = report.total_keywords,
        conflicts = report.conflicts.len(),
        multi_triggers = report.multi_triggers.len(),
        overlaps = report.overlaps.len(),
        "trigger analysis complete"
    );
    report
}

fn classify(map: TriggerMap) -> TriggerReport {
    let mut conflicts = Vec::new();
    let mut multi_triggers = Vec::new();

    for (keyword, usages) in &map.entries {
        if usages.len() < 2 {
            continue;
        }
        let has_positive = usages
            .iter()
            .any(|u| u.module == Module::Scoring && u.context == "positive");
        let has_negative = usages
            .iter()
            .any(|u| u.module == Module::Scoring && u.context == "negative");
        let issue = KeywordIssue {
            keyword: keyword.clone(),
            usages: usages.clone(),
        };
        if has_positive && has_negative {
            conflicts.push(issue);
        } else {
            multi_triggers.push(issue);
        }
    }

    let mut overlaps = Vec::new();
    for i in 0..map.entries.len() {
        for j in (i + 1)..map.entries.len() {
            let a = map.entries[i].0.as_str();
            let b = map.entries[j].0.as_str();
            if a.contains(b) || b.contains(a) {
                let (longer, shorter) = if a.len() > b.len() { (a, b) } else { (b, a) };
                overlaps.push(Overlap {
                    keywords: [a.to_string(), b.to_string()],
                    note: format!("\"{}\" contains \"{}\"", longer, shorter),
                });
            }
        }
    }

    TriggerReport {
        total_keywords: map.entries.len(),
        conflicts,
        multi_triggers,
        overlaps,
    }
}
