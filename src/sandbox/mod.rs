//! Sandboxed test execution for generated scripts.
//!
//! A script under test sees exactly three bindings: the platform-shaped
//! `context` object, a capturing `console`, and `Math`. Nothing else from
//! the host environment is reachable. Script-level failures are folded into
//! the run result; only host-level failures (engine setup, result
//! marshalling) surface as errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ForgeError;

pub mod boa;

pub use boa::BoaHost;

/// One synthetic message to run a script against.
#[derive(Debug, Clone)]
pub struct TestInput {
    pub message: String,
    pub char_name: String,
}

impl TestInput {
    pub fn new(message: impl Into<String>, char_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            char_name: char_name.into(),
        }
    }
}

/// Outcome of one sandboxed run. Field names mirror the harness's JSON
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub message: String,
    pub console_logs: Vec<String>,
    pub personality: String,
    pub scenario: String,
    pub examples: String,
    pub error: bool,
    pub error_message: String,
    pub has_changes: bool,
}

/// Pluggable script engine. One implementation today; the trait keeps the
/// CLI and tests independent of the engine choice.
pub trait ScriptHost {
    /// Run `script` against a freshly built context. Script exceptions are
    /// reported inside the `TestRun`; an `Err` means the host itself failed.
    fn run(&mut self, script: &str, input: &TestInput) -> Result<TestRun, ForgeError>;
}

/// Aggregate over a batch of messages, each run in its own fresh context.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub triggered: usize,
    pub no_trigger: usize,
    pub errors: usize,
    pub runs: Vec<TestRun>,
}

/// Run `script` once per message. Host failures for one message do not
/// abort the batch; they are recorded as error runs.
pub fn run_batch<H: ScriptHost>(
    host: &mut H,
    script: &str,
    messages: &[String],
    char_name: &str,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for message in messages {
        let input = TestInput::new(message.clone(), char_name);
        let run = match host.run(script, &input) {
            Ok(run) => run,
            Err(e) => {
                debug!(message = %message, error = %e, "host failure during batch run");
                TestRun {
                    message: message.clone(),
                    console_logs: vec![format!("[EXECUTION ERROR] {}", e)],
                    personality: String::new(),
                    scenario: String::new(),
                    examples: String::new(),
                    error: true,
                    error_message: e.to_string(),
                    has_changes: false,
                }
            }
        };
        if run.error {
            summary.errors += 1;
        } else if run.has_changes {
            summary.triggered += 1;
        } else {
            summary.no_trigger += 1;
        }
        summary.runs.push(run);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted host for exercising the batch aggregation without an engine.
    struct FakeHost;

    impl ScriptHost for FakeHost {
        fn run(&mut self, _script: &str, input: &TestInput) -> Result<TestRun, ForgeError> {
            match input.message.as_str() {
                "boom" => Err(ForgeError::Host("engine down".into())),
                message => {
                    let hit = message.contains("fire");
                    Ok(TestRun {
                        message: message.to_string(),
                        console_logs: vec![],
                        personality: if hit { "changed".into() } else { String::new() },
                        scenario: String::new(),
                        examples: String::new(),
                        error: false,
                        error_message: String::new(),
                        has_changes: hit,
                    })
                }
            }
        }
    }

    #[test]
    fn test_batch_counts_triggered_quiet_and_errors() {
        let messages = vec![
            "fire one".to_string(),
            "nothing".to_string(),
            "boom".to_string(),
            "fire two".to_string(),
        ];
        let summary = run_batch(&mut FakeHost, "ignored", &messages, "Aria");
        assert_eq!(summary.triggered, 2);
        assert_eq!(summary.no_trigger, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.runs.len(), 4);
    }

    #[test]
    fn test_host_failure_becomes_error_run() {
        let summary = run_batch(&mut FakeHost, "ignored", &["boom".to_string()], "");
        let run = &summary.runs[0];
        assert!(run.error);
        assert!(run.error_message.contains("engine down"));
        assert_eq!(run.console_logs.len(), 1);
        assert!(run.console_logs[0].starts_with("[EXECUTION ERROR] "));
    }
}
