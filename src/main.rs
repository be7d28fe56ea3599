//! scriptforge - Script builder for chat-character platforms
//!
//! Usage:
//!   scriptforge init                     Write a starter rules file
//!   scriptforge generate rules.toml      Generate the combined script
//!   scriptforge analyze rules.toml       Scan for keyword conflicts
//!   scriptforge test --rules rules.toml -m "hello"   Sandbox-test a script
//!   scriptforge --help                   Show all commands

use anyhow::Result;
use clap::Parser;

use scriptforge::cli::output::{print_error, OutputMode};
use scriptforge::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so generated scripts on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scriptforge=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);

    if let Err(e) = scriptforge::cli::execute(&cli.command, mode) {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
