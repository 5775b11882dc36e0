//! Stencil CLI — the command-line interface for the stencil template
//! compiler.
//!
//! Provides `stencil compile` to build templates into cached units,
//! `stencil status` to report cache freshness without compiling, and
//! `stencil sections` to dump a parsed template document for debugging.

#![warn(missing_docs)]

mod compile;
mod project;
mod sections;
mod status;

use std::process;

use clap::{Parser, Subcommand};

/// Stencil — an incremental template compiler.
#[derive(Parser, Debug)]
#[command(name = "stencil", version, about = "Stencil template compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `stencil.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile templates into cached units.
    Compile(CompileArgs),
    /// Report cache freshness per template without compiling.
    Status(StatusArgs),
    /// Print a template's parsed sections as JSON.
    Sections(SectionsArgs),
}

/// Arguments for the `stencil compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Template files to compile. When omitted, every template under the
    /// configured templates directory is compiled.
    pub paths: Vec<String>,

    /// Recompile even when the cache record is fresh.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `stencil status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Template files to check. When omitted, every template under the
    /// configured templates directory is checked.
    pub paths: Vec<String>,
}

/// Arguments for the `stencil sections` subcommand.
#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// The template file to parse.
    pub file: String,
}

/// Global options shared by all commands.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Status(ref args) => status::run(args, &global),
        Command::Sections(ref args) => sections::run(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_compile_with_paths() {
        let cli = Cli::parse_from(["stencil", "compile", "a.stencil", "b.stencil"]);
        match cli.command {
            Command::Compile(ref args) => {
                assert_eq!(args.paths, vec!["a.stencil", "b.stencil"]);
                assert!(!args.force);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_compile_force() {
        let cli = Cli::parse_from(["stencil", "compile", "--force"]);
        match cli.command {
            Command::Compile(ref args) => assert!(args.force),
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_status_without_paths() {
        let cli = Cli::parse_from(["stencil", "status"]);
        match cli.command {
            Command::Status(ref args) => assert!(args.paths.is_empty()),
            _ => panic!("expected Status command"),
        }
    }

    #[test]
    fn parse_sections() {
        let cli = Cli::parse_from(["stencil", "sections", "pages/home.stencil"]);
        match cli.command {
            Command::Sections(ref args) => assert_eq!(args.file, "pages/home.stencil"),
            _ => panic!("expected Sections command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["stencil", "--quiet", "--config", "site/stencil.toml", "status"]);
        assert!(cli.quiet);
        assert_eq!(cli.config.as_deref(), Some("site/stencil.toml"));
    }
}
