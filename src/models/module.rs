use serde::{Deserialize, Serialize};

use crate::ForgeError;

/// One independently toggleable rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Lorebook,
    Memory,
    Pacing,
    Tone,
    Time,
    Ambient,
    Random,
    Combined,
    Scoring,
}

impl Module {
    /// All modules in the builder's default panel order.
    pub const ALL: [Module; 9] = [
        Module::Lorebook,
        Module::Memory,
        Module::Pacing,
        Module::Tone,
        Module::Time,
        Module::Ambient,
        Module::Random,
        Module::Combined,
        Module::Scoring,
    ];

    /// Lowercase identifier used in rules files and on the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Module::Lorebook => "lorebook",
            Module::Memory => "memory",
            Module::Pacing => "pacing",
            Module::Tone => "tone",
            Module::Time => "time",
            Module::Ambient => "ambient",
            Module::Random => "random",
            Module::Combined => "combined",
            Module::Scoring => "scoring",
        }
    }

    /// Banner text used in each fragment's standalone header comment.
    pub fn banner(&self) -> &'static str {
        match self {
            Module::Lorebook => "LOREBOOK",
            Module::Memory => "MEMORY SYSTEM",
            Module::Pacing => "PACING",
            Module::Tone => "TONE/STATE ENGINE",
            Module::Time => "TIME & ENVIRONMENT",
            Module::Ambient => "AMBIENT EVENTS",
            Module::Random => "RANDOM EVENTS",
            Module::Combined => "COMBINED CONDITIONS",
            Module::Scoring => "SCORING ENGINE",
        }
    }

    /// Whether this module's generated code reads the message counter.
    pub fn needs_message_count(&self) -> bool {
        matches!(self, Module::Pacing | Module::Combined)
    }

    /// Whether this module's generated code calls `hourInRange`.
    pub fn needs_hour_in_range(&self) -> bool {
        matches!(self, Module::Time | Module::Combined)
    }

    pub fn parse(name: &str) -> Result<Module, ForgeError> {
        Module::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name.trim().to_lowercase())
            .ok_or_else(|| ForgeError::UnknownModule(name.to_string()))
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered module list with per-module enabled flags.
///
/// Defines both the combination order of fragments and the scope of the
/// trigger analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleOrder {
    entries: Vec<(Module, bool)>,
}

impl ModuleOrder {
    /// Build from an explicit order plus the set of enabled modules.
    /// Duplicate entries in `order` keep their first occurrence; modules
    /// missing from `order` are appended in default order, disabled.
    pub fn new(order: &[Module], enabled: &[Module]) -> Self {
        let mut entries: Vec<(Module, bool)> = Vec::with_capacity(Module::ALL.len());
        for m in order {
            if !entries.iter().any(|(existing, _)| existing == m) {
                entries.push((*m, enabled.contains(m)));
            }
        }
        for m in Module::ALL {
            if !entries.iter().any(|(existing, _)| *existing == m) {
                entries.push((m, enabled.contains(&m)));
            }
        }
        Self { entries }
    }

    /// Enabled modules, in combination order.
    pub fn enabled(&self) -> impl Iterator<Item = Module> + '_ {
        self.entries
            .iter()
            .filter(|(_, on)| *on)
            .map(|(m, _)| *m)
    }

    pub fn is_enabled(&self, module: Module) -> bool {
        self.entries
            .iter()
            .any(|(m, on)| *m == module && *on)
    }

    pub fn any_enabled(&self) -> bool {
        self.entries.iter().any(|(_, on)| *on)
    }
}

impl Default for ModuleOrder {
    /// The builder's shipped defaults: panel order, with the four starter
    /// modules switched on.
    fn default() -> Self {
        ModuleOrder::new(
            &Module::ALL,
            &[Module::Lorebook, Module::Memory, Module::Pacing, Module::Tone],
        )
    }
}
