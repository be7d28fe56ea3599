//! Rule-table compilation: each module's generator turns its typed rules
//! into a fragment of procedural script text, and the combiner stitches
//! enabled fragments into one script.

pub mod ambient;
pub mod combined;
pub mod combiner;
pub mod fragment;
pub mod lorebook;
pub mod memory;
pub mod pacing;
pub mod random;
pub mod runtime;
pub mod scoring;
pub mod time;
pub mod tone;

pub use combiner::{combine, CombinedScript};
pub use fragment::Fragment;

use crate::models::{GenOptions, Module, RuleSet};

/// Compile one module's rule table into a fragment.
pub fn build_fragment(module: Module, rules: &RuleSet, opts: &GenOptions) -> Fragment {
    match module {
        Module::Lorebook => lorebook::build(&rules.lorebook, opts),
        Module::Memory => memory::build(&rules.memory, opts),
        Module::Pacing => pacing::build(&rules.pacing, opts),
        Module::Tone => tone::build(&rules.tone, opts),
        Module::Time => time::build(&rules.time, opts),
        Module::Ambient => ambient::build(&rules.ambient, opts),
        Module::Random => random::build(&rules.random, opts),
        Module::Combined => combined::build(&rules.combined, opts),
        Module::Scoring => scoring::build(&rules.scoring, opts),
    }
}

/// Compile one module and render it as a standalone script, boilerplate
/// included.
pub fn generate_standalone(module: Module, rules: &RuleSet, opts: &GenOptions) -> String {
    build_fragment(module, rules, opts).standalone()
}
