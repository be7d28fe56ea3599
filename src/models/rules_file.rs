//! Rules project file: the TOML document holding a project's options,
//! module toggles, and rule tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{GenOptions, Module, ModuleOrder, RuleSet};
use crate::ForgeError;

/// Module order and toggles as written in the rules file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesSection {
    pub order: Vec<Module>,
    pub enabled: Vec<Module>,
}

impl Default for ModulesSection {
    fn default() -> Self {
        Self {
            order: Module::ALL.to_vec(),
            enabled: vec![Module::Lorebook, Module::Memory, Module::Pacing, Module::Tone],
        }
    }
}

/// Complete rules project file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesFile {
    pub options: GenOptions,
    pub modules: ModulesSection,
    pub rules: RuleSet,
}

impl RulesFile {
    pub fn load(path: &Path) -> Result<Self, ForgeError> {
        let raw = std::fs::read_to_string(path)?;
        let file: RulesFile = toml::from_str(&raw)?;
        Ok(file)
    }

    pub fn module_order(&self) -> ModuleOrder {
        ModuleOrder::new(&self.modules.order, &self.modules.enabled)
    }

    /// Starter project with the shipped default tables.
    pub fn starter() -> Self {
        let mut file = RulesFile::default();
        file.rules.memory.name_phrase = "my name is".to_string();
        file.rules.memory.facts_keywords = split_list("fact, i am, i work as, i study");
        file.rules.memory.likes_keywords = split_list("i like, i love, i enjoy, favorite");
        file.rules.memory.dislikes_keywords =
            split_list("i hate, i dislike, i don't like, can't stand");
        file.rules.scoring.positive = split_list("love, great, wonderful, amazing");
        file.rules.scoring.negative = split_list("hate, awful, terrible, horrible");
        file
    }

    /// Starter project serialized to TOML, for `scriptforge init`.
    pub fn starter_toml() -> Result<String, ForgeError> {
        toml::to_string_pretty(&Self::starter())
            .map_err(|e| ForgeError::Rules(format!("failed to render starter rules: {}", e)))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_round_trips_through_toml() {
        let toml_text = RulesFile::starter_toml().unwrap();
        let parsed: RulesFile = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.rules.memory.name_phrase, "my name is");
        assert_eq!(parsed.options.ambient_probability, 10);
        assert!(parsed.module_order().is_enabled(Module::Lorebook));
        assert!(!parsed.module_order().is_enabled(Module::Scoring));
    }

    #[test]
    fn test_missing_sections_default() {
        let parsed: RulesFile = toml::from_str("").unwrap();
        assert!(parsed.rules.lorebook.is_empty());
        assert_eq!(parsed.options.time_offset, 0);
    }
}
