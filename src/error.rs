use thiserror::Error;

/// Custom error type for scriptforge operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Combination was requested with every module toggled off.
    /// Surfaced to the user as a warning, not a crash: generation simply
    /// does not proceed.
    #[error("No modules enabled: enable at least one module before combining")]
    NoModulesEnabled,

    /// Rules file could not be read or parsed.
    #[error("Rules error: {0}")]
    Rules(String),

    /// A module name did not match any known module.
    #[error("Unknown module '{0}' (expected one of: lorebook, memory, pacing, tone, time, ambient, random, combined, scoring)")]
    UnknownModule(String),

    /// The embedded script host failed outside the tested fragment itself.
    /// Fragment-level failures are reported in `TestRun`, never here.
    #[error("Script host error: {0}")]
    Host(String),
}

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        ForgeError::Rules(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        ForgeError::Rules(err.to_string())
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::Host(format!("result marshalling failed: {}", err))
    }
}
