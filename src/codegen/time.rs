//! Time generator: hour-of-day scenario changes with wrap-around ranges.
//!
//! The current hour is `(wall clock hour + offset + 24) % 24`; the offset
//! lets a card simulate a different timezone than the platform host.

use crate::models::{GenOptions, HourRange, Module};
use crate::utils::escape::escape_for_script_literal;

use super::fragment::{CodeBuf, Fragment};

pub fn build(slots: &[HourRange], opts: &GenOptions) -> Fragment {
    let usable: Vec<(i64, i64, &str)> = slots.iter().filter_map(|s| s.usable()).collect();
    if usable.is_empty() {
        return Fragment::noop(Module::Time);
    }

    let mut b = CodeBuf::new();
    b.line(&format!("var offset = {};", opts.time_offset));
    b.line("var hour = (new Date().getHours() + offset + 24) % 24;");
    b.line("var timeSet = false;");
    b.blank();

    for (start, end, content) in &usable {
        b.line(&format!("if (hourInRange(hour, {}, {})) {{", start, end));
        b.line(&format!(
            "  context.character.scenario += '\\n{}';",
            escape_for_script_literal(content)
        ));
        b.line("  timeSet = true;");
        b.line("}");
    }

    if opts.debug_mode {
        b.blank();
        b.line("if (timeSet) {");
        b.line("  context.character.scenario += '\\n(debug: time module fired, hour=' + hour + ')';");
        b.line("}");
    }

    Fragment::new(Module::Time, b.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: i64, end: i64, content: &str) -> HourRange {
        HourRange {
            start: Some(start),
            end: Some(end),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_no_slots_is_noop() {
        assert!(build(&[], &GenOptions::default()).is_noop());
    }

    #[test]
    fn test_negative_offset_embedded() {
        let opts = GenOptions {
            time_offset: -5,
            ..GenOptions::default()
        };
        let frag = build(&[slot(22, 4, "night shift")], &opts);
        let body = frag.body();
        assert!(body.contains("var offset = -5;"));
        assert!(body.contains("if (hourInRange(hour, 22, 4)) {"));
    }

    #[test]
    fn test_body_relies_on_shared_helper() {
        // The helper definition itself belongs to standalone/combined
        // boilerplate, never to the body.
        let frag = build(&[slot(9, 17, "daytime")], &GenOptions::default());
        assert!(!frag.body().contains("function hourInRange"));
        assert!(frag.standalone().contains("function hourInRange"));
    }
}
