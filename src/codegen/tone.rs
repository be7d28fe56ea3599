//! Tone generator: keyword-triggered personality shifts.

use crate::models::{GenOptions, KeywordRule, Module};
use crate::utils::escape::escape_for_script_literal;

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

pub fn build(triggers: &[KeywordRule], opts: &GenOptions) -> Fragment {
    let usable: Vec<(Vec<String>, &str)> = triggers.iter().filter_map(|t| t.usable()).collect();
    if usable.is_empty() {
        return Fragment::noop(Module::Tone);
    }

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.blank();

    if opts.tone_padded {
        b.line("var padded = ' ' + message.toLowerCase() + ' ';");
    } else {
        b.line("var msgLower = message.toLowerCase();");
    }
    b.line("var toneSet = false;");
    b.blank();

    for (keywords, content) in &usable {
        b.line(&format!("// Tone Trigger: {}", keywords.join(", ")));
        for keyword in keywords {
            if opts.tone_padded {
                b.line(&format!(
                    "if (padded.indexOf(' {} ') !== -1) {{",
                    escape_for_script_literal(keyword)
                ));
            } else {
                b.line(&format!(
                    "if (msgLower.indexOf('{}') !== -1) {{",
                    escape_for_script_literal(keyword)
                ));
            }
            b.line(&format!(
                "  context.character.personality += '\\n{}';",
                escape_for_script_literal(content)
            ));
            b.line("  toneSet = true;");
            b.line("}");
        }
        b.blank();
    }

    if opts.debug_mode {
        b.line("if (toneSet) {");
        b.line("  context.character.scenario += '\\n(debug: tone engine fired)';");
        b.line("}");
    }

    Fragment::new(Module::Tone, b.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keywords: &[&str], content: &str) -> KeywordRule {
        KeywordRule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_triggers_noop() {
        assert!(build(&[], &GenOptions::default()).is_noop());
    }

    #[test]
    fn test_each_keyword_gets_its_own_check() {
        let frag = build(&[rule(&["angry", "furious"], "Calm and soothing")], &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("if (msgLower.indexOf('angry') !== -1) {"));
        assert!(body.contains("if (msgLower.indexOf('furious') !== -1) {"));
        assert_eq!(body.matches("personality += '\\nCalm and soothing';").count(), 2);
    }

    #[test]
    fn test_padded_mode_wraps_keyword_in_spaces() {
        let opts = GenOptions {
            tone_padded: true,
            ..GenOptions::default()
        };
        let frag = build(&[rule(&["sad"], "gentle")], &opts);
        assert!(frag.body().contains("if (padded.indexOf(' sad ') !== -1) {"));
    }

    #[test]
    fn test_keyword_apostrophes_escaped() {
        let frag = build(&[rule(&["don't"], "reassure")], &GenOptions::default());
        assert!(frag.body().contains("msgLower.indexOf('don\\'t')"));
    }
}
