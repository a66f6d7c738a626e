//! pslint CLI binary entry point.
//! Delegates to library modules and maps results to exit codes:
//! 0 clean, 1 registry errors (or misordered submissions with `--check`),
//! 2 operational failure.

use anyhow::{Context, Result};
use clap::Parser;
use pslint::cli::{Cli, Commands};
use pslint::lint::{display_name, LintOptions};
use pslint::utils::{error_prefix, note_prefix};
use pslint::{config, lint, output, submissions};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lint {
            paths,
            repo_root,
            output,
            check_order,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &paths,
                output.as_deref(),
                if check_order { Some(true) } else { None },
                None,
            )
            .context("resolving configuration")?;
            if !files_available(&eff) {
                return Ok(ExitCode::from(2));
            }
            tracing::info!(
                files = eff.files.len(),
                check_order = eff.check_order,
                "linting"
            );
            let (results, errors) = lint::run_lint(
                &eff.files,
                &eff.repo_root,
                LintOptions {
                    check_order: eff.check_order,
                },
            );
            output::print_lint(&results, &eff.output, &errors);
            if !errors.is_empty() {
                return Ok(ExitCode::from(2));
            }
            if results.iter().any(|r| r.has_errors()) {
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submissions {
            path,
            repo_root,
            output,
            check,
        } => {
            let cli_files: Vec<String> = path.into_iter().collect();
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &cli_files,
                output.as_deref(),
                None,
                if check { Some(true) } else { None },
            )
            .context("resolving configuration")?;
            if !files_available(&eff) {
                return Ok(ExitCode::from(2));
            }
            let target = &eff.files[0];
            let name = display_name(target, &eff.repo_root);
            let report = submissions::analyze_path(target, &name)
                .with_context(|| format!("analyzing {}", name))?;
            output::print_submissions(&report, &eff.output);
            if eff.check_submissions && !report.is_clean() {
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Explain a missing or empty file selection on stderr.
fn files_available(eff: &config::Effective) -> bool {
    if !eff.files_configured {
        if !has_config(&eff.repo_root) {
            eprintln!("{} No pslint.toml found; using defaults.", note_prefix());
        }
        eprintln!(
            "{} No registry file given. Pass a path (or '-') or set `files` in pslint.toml.",
            error_prefix()
        );
        return false;
    }
    if eff.files.is_empty() {
        eprintln!(
            "{} The `files` patterns in pslint.toml matched nothing under {}.",
            error_prefix(),
            eff.repo_root.to_string_lossy()
        );
        return false;
    }
    true
}

fn has_config(root: &Path) -> bool {
    config::CONFIG_NAMES.iter().any(|n| root.join(n).exists())
}
