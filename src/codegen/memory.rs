//! Memory generator: auto-detect and remember user info.
//!
//! Optional name capture via a configurable lead-in phrase, plus three
//! independent keyword categories (facts/likes/dislikes). Each category
//! appends `"<Label>: " + message` on its first keyword hit only, and each
//! line is deduplicated against the existing scenario text.

use crate::models::{normalize_keywords, GenOptions, MemoryConfig, Module};
use crate::utils::escape::{escape_for_regex_literal, escape_for_script_literal, js_quote};

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

pub fn build(config: &MemoryConfig, opts: &GenOptions) -> Fragment {
    let name_phrase = config.name_phrase.trim().to_lowercase();
    let facts = normalize_keywords(&config.facts_keywords);
    let likes = normalize_keywords(&config.likes_keywords);
    let dislikes = normalize_keywords(&config.dislikes_keywords);

    if name_phrase.is_empty() && facts.is_empty() && likes.is_empty() && dislikes.is_empty() {
        return Fragment::noop(Module::Memory);
    }

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.line("var last_message = message.toLowerCase();");
    b.line("var memoryUpdated = false;");
    b.blank();

    if !name_phrase.is_empty() {
        // Lead-in phrase is regex-escaped, then literal-escaped, so the
        // generated RegExp matches it verbatim. The capture permits letters
        // with diacritics, hyphens and apostrophes: 2-40 chars that are not
        // digits or sentence punctuation.
        let phrase = escape_for_script_literal(&escape_for_regex_literal(&name_phrase));
        b.line("// Name Detection (captures names with accents, hyphens, apostrophes)");
        b.line(&format!(
            "var nameRegex = new RegExp('{}\\\\s+([^\\\\d,.;!?]{{2,40}})', 'i');",
            phrase
        ));
        b.line("var nameMatch = last_message.match(nameRegex);");
        b.line("if (nameMatch && nameMatch[1]) {");
        b.line("  var detectedName = nameMatch[1].trim();");
        b.line("  // Dedupe: only add if not already present");
        b.line("  if (context.character.scenario.indexOf('User name: ' + detectedName) === -1) {");
        b.line("    context.character.scenario += '\\nUser name: ' + detectedName;");
        b.line("    memoryUpdated = true;");
        b.line("  }");
        b.line("}");
        b.blank();
    }

    emit_category(&mut b, "facts", "Fact", &facts);
    emit_category(&mut b, "likes", "Likes", &likes);
    emit_category(&mut b, "dislikes", "Dislikes", &dislikes);

    if opts.debug_mode {
        b.line("// Debug Output");
        b.line("if (memoryUpdated) {");
        b.line("  context.character.scenario += '\\n(debug: memory updated)';");
        b.line("}");
    }

    Fragment::new(Module::Memory, b.finish())
}

/// One keyword category: scan, append labelled message, dedupe, and stop at
/// the first keyword hit so each category adds at most one line per turn.
fn emit_category(b: &mut CodeBuf, name: &str, label: &str, keywords: &[String]) {
    if keywords.is_empty() {
        return;
    }
    let list = keywords
        .iter()
        .map(|k| js_quote(k))
        .collect::<Vec<_>>()
        .join(", ");
    let var = format!("{}Keywords", name);
    let entry_var = format!("{}Entry", name.trim_end_matches('s'));

    b.line(&format!(
        "// {} Detection with deduplication",
        capitalize(name)
    ));
    b.line(&format!("var {} = [{}];", var, list));
    b.line(&format!("for (var i = 0; i < {}.length; i++) {{", var));
    b.line(&format!("  if (last_message.indexOf({}[i]) !== -1) {{", var));
    b.line(&format!("    var {} = '{}: ' + message;", entry_var, label));
    b.line(&format!(
        "    if (context.character.scenario.indexOf({}) === -1) {{",
        entry_var
    ));
    b.line(&format!(
        "      context.character.scenario += '\\n' + {};",
        entry_var
    ));
    b.line("      memoryUpdated = true;");
    b.line("    }");
    b.line("    break;");
    b.line("  }");
    b.line("}");
    b.blank();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_config_is_noop() {
        let frag = build(&MemoryConfig::default(), &GenOptions::default());
        assert!(frag.is_noop());
    }

    #[test]
    fn test_name_phrase_is_double_escaped() {
        let config = MemoryConfig {
            name_phrase: "call me Mr.".to_string(),
            ..MemoryConfig::default()
        };
        let frag = build(&config, &GenOptions::default());
        // Regex escape adds a backslash before the dot, literal escape
        // doubles it, so the runtime regex sees a literal dot.
        assert!(frag.body().contains("new RegExp('call me mr\\\\.\\\\s+"));
    }

    #[test]
    fn test_each_category_short_circuits() {
        let config = MemoryConfig {
            likes_keywords: vec!["i like".into(), "i love".into()],
            ..MemoryConfig::default()
        };
        let frag = build(&config, &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("var likesKeywords = ['i like', 'i love'];"));
        assert!(body.contains("var likeEntry = 'Likes: ' + message;"));
        assert!(body.contains("    break;"));
        assert!(!body.contains("factsKeywords"));
    }

    #[test]
    fn test_debug_marker_included_when_enabled() {
        let config = MemoryConfig {
            facts_keywords: vec!["i am".into()],
            ..MemoryConfig::default()
        };
        let opts = GenOptions {
            debug_mode: true,
            ..GenOptions::default()
        };
        let frag = build(&config, &opts);
        assert!(frag.body().contains("(debug: memory updated)"));
    }
}
