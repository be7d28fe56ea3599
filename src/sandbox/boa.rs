//! Boa-backed script host.
//!
//! Each run builds a self-contained harness program and evaluates it in a
//! brand-new engine context, so no state can leak between runs. The harness
//! does all the platform shaping in JS (context object, console shim, the
//! three-binding wrapper) and hands back a single JSON string, which keeps
//! the engine-facing surface here to one eval and one string conversion.

use boa_engine::{Context, Source};
use tracing::debug;

use crate::ForgeError;

use super::{ScriptHost, TestInput, TestRun};

#[derive(Debug, Default)]
pub struct BoaHost;

impl BoaHost {
    pub fn new() -> Self {
        BoaHost
    }
}

impl ScriptHost for BoaHost {
    fn run(&mut self, script: &str, input: &TestInput) -> Result<TestRun, ForgeError> {
        let harness = build_harness(script, input);
        debug!(
            script_bytes = script.len(),
            message = %input.message,
            "evaluating script in fresh context"
        );

        let mut context = Context::default();
        let value = context
            .eval(Source::from_bytes(&harness))
            .map_err(|e| ForgeError::Host(e.to_string()))?;
        let json = value
            .to_string(&mut context)
            .map_err(|e| ForgeError::Host(e.to_string()))?
            .to_std_string_escaped();

        let run: TestRun = serde_json::from_str(&json)?;
        Ok(run)
    }
}

/// Assemble the harness program. The script text and the two input strings
/// are embedded as JSON string literals, which are valid JS literals, so no
/// hand escaping happens here.
fn build_harness(script: &str, input: &TestInput) -> String {
    let script_literal =
        serde_json::to_string(script).unwrap_or_else(|_| "\"\"".to_string());
    let message_literal =
        serde_json::to_string(&input.message).unwrap_or_else(|_| "\"\"".to_string());
    let name_literal =
        serde_json::to_string(&input.char_name).unwrap_or_else(|_| "\"\"".to_string());

    format!(
        r#"(function() {{
  var context = {{
    chat: {{
      last_message: {message},
      last_messages: [],
      message_count: 1,
      multi_depth_enabled: false
    }},
    character: {{
      name: {name},
      personality: '',
      scenario: '',
      example_dialogues: ''
    }}
  }};

  var __logs = [];
  function capture(prefix) {{
    return function() {{
      var args = Array.prototype.slice.call(arguments);
      __logs.push(prefix + args.map(String).join(' '));
    }};
  }}
  var mockConsole = {{
    log: capture(''),
    error: capture('[ERROR] '),
    warn: capture('[WARN] '),
    info: capture('[INFO] ')
  }};

  var errorOccurred = false;
  var errorMessage = '';
  try {{
    var scriptFn = eval('(function(context, console, Math) {{\n' + {script} + '\n}})');
    scriptFn(context, mockConsole, Math);
  }} catch (e) {{
    errorOccurred = true;
    errorMessage = String(e);
    __logs.push('[EXECUTION ERROR] ' + errorMessage);
  }}

  return JSON.stringify({{
    message: {message},
    consoleLogs: __logs,
    personality: context.character.personality,
    scenario: context.character.scenario,
    examples: context.character.example_dialogues,
    error: errorOccurred,
    errorMessage: errorMessage,
    hasChanges: !!(context.character.personality || context.character.scenario || context.character.example_dialogues)
  }});
}})()"#,
        message = message_literal,
        name = name_literal,
        script = script_literal,
    )
}
