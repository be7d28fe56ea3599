//! CLI interface for scriptforge.

pub mod handlers;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use output::OutputMode;

/// scriptforge - Compile declarative trigger rules into character scripts
#[derive(Parser)]
#[command(name = "scriptforge", version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter rules file with the builder's default tables
    Init {
        /// Where to write the rules file
        #[arg(default_value = "rules.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate a script from a rules file
    Generate {
        /// Rules file (TOML)
        rules: PathBuf,
        /// Generate a single module's standalone script instead of the
        /// combined one
        #[arg(long)]
        module: Option<String>,
        /// Write the script here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Scan rule tables for keyword conflicts and overlaps
    Analyze {
        /// Rules file (TOML)
        rules: PathBuf,
    },

    /// Run a script against test messages in a sandbox
    Test {
        /// Rules file to generate the script under test from
        #[arg(long, conflicts_with = "script")]
        rules: Option<PathBuf>,
        /// Test one module's standalone script (with --rules)
        #[arg(long, requires = "rules")]
        module: Option<String>,
        /// Script file to run as-is, bypassing generation
        #[arg(long)]
        script: Option<PathBuf>,
        /// Test message (repeatable)
        #[arg(long = "message", short = 'm')]
        messages: Vec<String>,
        /// File with one test message per line
        #[arg(long)]
        batch: Option<PathBuf>,
        /// Character name exposed as context.character.name
        #[arg(long, default_value = "")]
        char_name: String,
    },
}

/// Execute a CLI command, dispatching to the appropriate handler.
pub fn execute(command: &Commands, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Init { path, force } => handlers::init::handle_init(path, *force, mode),
        Commands::Generate {
            rules,
            module,
            output,
        } => handlers::generate::handle_generate(rules, module.as_deref(), output.as_deref(), mode),
        Commands::Analyze { rules } => handlers::analyze::handle_analyze(rules, mode),
        Commands::Test {
            rules,
            module,
            script,
            messages,
            batch,
            char_name,
        } => handlers::test::handle_test(
            rules.as_deref(),
            module.as_deref(),
            script.as_deref(),
            messages,
            batch.as_deref(),
            char_name,
            mode,
        ),
    }
}
