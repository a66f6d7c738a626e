//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pslint",
    version,
    about = "Public suffix list linter",
    long_about = "pslint: validate a public suffix registry (sections, rule syntax, doublettes, exceptions and group order) before it is published.\n\nConfiguration precedence: CLI > pslint.toml > defaults.",
    after_help = "Examples:\n  pslint lint public_suffix_list.dat\n  cat public_suffix_list.dat | pslint lint -\n  pslint lint --check-order --output json public_suffix_list.dat\n  pslint submissions --check public_suffix_list.dat",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current pslint version.")]
    Version,
    /// Lint registry files
    #[command(
        about = "Run lint checks",
        long_about = "Validate section structure and every rule of the given registry files. Exits non-zero when any error is found; warnings never affect the exit status.",
        after_help = "Examples:\n  pslint lint public_suffix_list.dat\n  pslint lint --check-order -"
    )]
    Lint {
        #[arg(help = "Registry files; '-' reads standard input (default: [files] from pslint.toml)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Check that rule groups are sorted")]
        check_order: bool,
    },
    /// Check submission order in the PRIVATE section
    #[command(
        about = "Check PRIVATE section submission order",
        long_about = "Verify that submission headers are alphabetical and that the rules of each submission are in suffix order.",
        after_help = "Examples:\n  pslint submissions public_suffix_list.dat\n  pslint submissions --check --output json public_suffix_list.dat"
    )]
    Submissions {
        #[arg(help = "Registry file; '-' reads standard input (default: first of [files] from pslint.toml)")]
        path: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if anything is out of order")]
        check: bool,
    },
}
