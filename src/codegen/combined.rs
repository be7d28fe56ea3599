//! Combined-conditions generator: multi-trigger AND rules.
//!
//! Per rule, the keyword list is OR-ed into a `keywordMatchN` flag which is
//! then AND-ed with whichever numeric sub-conditions the rule carries. An
//! absent numeric field is elided from the boolean expression entirely (it
//! neither passes nor fails the rule), and the hour conjunct requires both
//! bounds.

use crate::models::{CombinedRule, GenOptions, Module};
use crate::utils::escape::escape_for_script_literal;

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

pub fn build(rules: &[CombinedRule], opts: &GenOptions) -> Fragment {
    let usable: Vec<(&CombinedRule, Vec<String>, &str)> = rules
        .iter()
        .filter_map(|r| r.usable().map(|(kw, result)| (r, kw, result)))
        .collect();
    if usable.is_empty() {
        return Fragment::noop(Module::Combined);
    }

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.line("var msgLower = message.toLowerCase();");
    b.line("var count = message_count;");
    b.line(&format!("var offset = {};", opts.time_offset));
    b.line("var hour = (new Date().getHours() + offset + 24) % 24;");
    b.line("var combinedFired = false;");
    b.blank();

    for (index, (rule, keywords, result)) in usable.iter().enumerate() {
        b.line(&format!("// Combined Rule {}", index + 1));
        b.line(&format!("var keywordMatch{} = false;", index));
        for keyword in keywords {
            b.line(&format!(
                "if (msgLower.indexOf('{}') !== -1) keywordMatch{} = true;",
                escape_for_script_literal(keyword),
                index
            ));
        }

        let mut condition = format!("keywordMatch{}", index);
        if let Some((min_hour, max_hour)) = rule.hour_window() {
            condition.push_str(&format!(" && hourInRange(hour, {}, {})", min_hour, max_hour));
        }
        if let Some(min_messages) = rule.min_messages {
            condition.push_str(&format!(" && count >= {}", min_messages));
        }

        b.line(&format!("if ({}) {{", condition));
        b.line(&format!(
            "  context.character.scenario += '\\n{}';",
            escape_for_script_literal(result)
        ));
        b.line("  combinedFired = true;");
        b.line("}");
        b.blank();
    }

    if opts.debug_mode {
        b.line("if (combinedFired) {");
        b.line("  context.character.scenario += '\\n(debug: combined conditions fired)';");
        b.line("}");
    }

    Fragment::new(Module::Combined, b.finish())
}
