use serde::{Deserialize, Serialize};

/// Global generation flags, passed explicitly into every generator call so
/// generation stays a pure function of its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenOptions {
    /// Append `(debug: ...)` marker lines to `scenario` when a module fires.
    pub debug_mode: bool,
    /// Lorebook: space-pad message and keywords to approximate whole-word
    /// matching.
    pub lore_padded: bool,
    /// Lorebook: stop at the first matching entry across all categories.
    pub lore_break_early: bool,
    /// Tone: space-padded matching, as above.
    pub tone_padded: bool,
    /// Default per-event probability (percent) for ambient events that do
    /// not carry their own.
    pub ambient_probability: u8,
    /// Hour offset added to the wall clock in generated time checks; may be
    /// negative to shift west of the host timezone.
    pub time_offset: i64,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            debug_mode: false,
            lore_padded: false,
            lore_break_early: false,
            tone_padded: false,
            ambient_probability: 10,
            time_offset: 0,
        }
    }
}
