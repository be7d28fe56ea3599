//! Lorebook generator: hierarchical keyword database injected into the
//! scenario.
//!
//! Categories are scanned in insertion order (people, places, objects,
//! moods, events), entries in array order. With break-early enabled the
//! scan stops at the first match anywhere; otherwise every matching entry
//! injects, each deduplicated against text already present in the scenario
//! (substring containment, not exact match).

use serde::Serialize;

use crate::models::{normalize_keywords, GenOptions, LoreCategory, LoreEntry, Module};

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

/// Entry shape embedded into the generated script as JSON.
#[derive(Serialize)]
struct TableEntry {
    keywords: Vec<String>,
    content: String,
}

/// Field order here is the frozen category scan order.
#[derive(Serialize, Default)]
struct LoreTable {
    people: Vec<TableEntry>,
    places: Vec<TableEntry>,
    objects: Vec<TableEntry>,
    moods: Vec<TableEntry>,
    events: Vec<TableEntry>,
}

impl LoreTable {
    fn bucket(&mut self, category: LoreCategory) -> &mut Vec<TableEntry> {
        match category {
            LoreCategory::People => &mut self.people,
            LoreCategory::Places => &mut self.places,
            LoreCategory::Objects => &mut self.objects,
            LoreCategory::Moods => &mut self.moods,
            LoreCategory::Events => &mut self.events,
        }
    }

    fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.places.is_empty()
            && self.objects.is_empty()
            && self.moods.is_empty()
            && self.events.is_empty()
    }
}

pub fn build(entries: &[LoreEntry], opts: &GenOptions) -> Fragment {
    let mut table = LoreTable::default();
    for entry in entries {
        let keywords = normalize_keywords(&entry.keywords);
        let content = entry.content.trim();
        if !keywords.is_empty() && !content.is_empty() {
            table.bucket(entry.category).push(TableEntry {
                keywords,
                content: content.to_string(),
            });
        }
    }

    if table.is_empty() {
        return Fragment::noop(Module::Lorebook);
    }

    let json = serde_json::to_string_pretty(&table)
        .expect("lorebook table of plain strings always serializes");

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.blank();
    b.line(&format!("var lorebook = {};", json));
    b.blank();

    if opts.lore_padded {
        b.line("var padded = ' ' + message.toLowerCase() + ' ';");
    } else {
        b.line("var msgLower = message.toLowerCase();");
    }
    b.line("var loreTriggered = false;");
    b.line("var found = false;");
    b.blank();

    let policy = if opts.lore_break_early {
        "break-early"
    } else {
        "multi-match"
    };
    b.line(&format!(
        "// Lorebook lookup with {} and deduplication",
        policy
    ));
    b.line("for (var category in lorebook) {");
    b.line("  var entries = lorebook[category];");
    b.line("  for (var i = 0; i < entries.length && !found; i++) {");
    b.line("    var entry = entries[i];");
    b.line("    for (var k = 0; k < entry.keywords.length; k++) {");
    if opts.lore_padded {
        b.line("      if (padded.indexOf(' ' + entry.keywords[k] + ' ') !== -1) {");
    } else {
        b.line("      if (msgLower.indexOf(entry.keywords[k]) !== -1) {");
    }
    b.line("        // Dedupe: only add if not already present");
    b.line("        if (context.character.scenario.indexOf(entry.content) === -1) {");
    b.line("          context.character.scenario += '\\n' + entry.content;");
    b.line("          loreTriggered = true;");
    b.line("        }");
    if opts.lore_break_early {
        b.line("        found = true;");
    }
    b.line("        break;");
    b.line("      }");
    b.line("    }");
    if opts.lore_break_early {
        b.line("    if (found) break;");
    }
    b.line("  }");
    if opts.lore_break_early {
        b.line("  if (found) break;");
    }
    b.line("}");
    b.blank();

    if opts.debug_mode {
        b.line("if (loreTriggered) {");
        b.line("  context.character.scenario += '\\n(debug: lorebook fired)';");
        b.line("}");
    }

    Fragment::new(Module::Lorebook, b.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: LoreCategory, keywords: &[&str], content: &str) -> LoreEntry {
        LoreEntry {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_table_is_noop() {
        let frag = build(&[], &GenOptions::default());
        assert!(frag.is_noop());
        // Rows without content are excluded, not errors
        let frag = build(
            &[entry(LoreCategory::People, &["alice"], "  ")],
            &GenOptions::default(),
        );
        assert!(frag.is_noop());
    }

    #[test]
    fn test_substring_mode_lowercases_message() {
        let frag = build(
            &[entry(LoreCategory::People, &["Alice"], "Alice is the queen.")],
            &GenOptions::default(),
        );
        let body = frag.body();
        assert!(body.contains("var msgLower = message.toLowerCase();"));
        assert!(body.contains("msgLower.indexOf(entry.keywords[k])"));
        // Keywords normalized to lowercase in the embedded table
        assert!(body.contains("\"alice\""));
    }

    #[test]
    fn test_padded_mode_pads_both_sides() {
        let opts = GenOptions {
            lore_padded: true,
            ..GenOptions::default()
        };
        let frag = build(&[entry(LoreCategory::Moods, &["sad"], "comfort mode")], &opts);
        let body = frag.body();
        assert!(body.contains("var padded = ' ' + message.toLowerCase() + ' ';"));
        assert!(body.contains("padded.indexOf(' ' + entry.keywords[k] + ' ')"));
    }

    #[test]
    fn test_break_early_emits_found_breaks() {
        let opts = GenOptions {
            lore_break_early: true,
            ..GenOptions::default()
        };
        let frag = build(&[entry(LoreCategory::Events, &["ball"], "the ball")], &opts);
        let body = frag.body();
        assert!(body.contains("found = true;"));
        assert!(body.contains("// Lorebook lookup with break-early and deduplication"));
    }

    #[test]
    fn test_category_order_in_embedded_table() {
        let frag = build(
            &[
                entry(LoreCategory::Events, &["ball"], "the ball"),
                entry(LoreCategory::People, &["alice"], "the queen"),
            ],
            &GenOptions::default(),
        );
        let body = frag.body();
        let people_at = body.find("\"people\"").unwrap();
        let events_at = body.find("\"events\"").unwrap();
        assert!(people_at < events_at, "people must precede events in the table");
    }
}
