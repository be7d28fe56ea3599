pub mod module;
pub mod options;
pub mod rules;
pub mod rules_file;

pub use module::{Module, ModuleOrder};
pub use options::GenOptions;
pub use rules::{
    normalize_keywords, AmbientEvent, CombinedRule, ExactTrigger, HourRange, KeywordRule,
    LoreCategory, LoreEntry, MemoryConfig, PacingRules, RandomEvent, RangeRule, RuleSet,
    ScoreOp, ScoreThreshold, ScoringConfig, ScoringMode,
};
pub use rules_file::RulesFile;
