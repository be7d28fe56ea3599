//! scriptforge - compile declarative trigger rules into character scripts.
//!
//! The core is a small code generator: typed rule tables (keyword triggers,
//! pacing windows, hour ranges, ambient events, combined AND-rules,
//! sentiment scoring, memory capture) compile into procedural script
//! fragments that mutate a chat platform's `context.character` fields. On
//! top of that sit a combiner that stitches enabled fragments into one
//! script, a static analyzer that flags keyword conflicts and overlaps
//! across modules, and a sandboxed executor for trying scripts against
//! synthetic messages.

pub mod analyzer;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod models;
pub mod sandbox;
pub mod utils;

pub use error::ForgeError;
