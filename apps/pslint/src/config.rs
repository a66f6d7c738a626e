//! Configuration discovery and effective settings resolution.
//!
//! pslint reads `pslint.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `files`: none (paths must come from the CLI or the config)
//! - `output`: `human`
//! - `order.check`: false
//! - `submissions.check`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{LintError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["pslint.toml", "pslint.yaml", "pslint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Group order settings under `[order]`.
pub struct OrderCfg {
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Submission analysis settings under `[submissions]`.
pub struct SubmissionsCfg {
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `pslint.toml|yaml`.
pub struct PslintConfig {
    /// Glob patterns, relative to the repository root.
    #[serde(default)]
    pub files: Vec<String>,
    pub output: Option<String>,
    pub order: Option<OrderCfg>,
    pub submissions: Option<SubmissionsCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub files: Vec<PathBuf>,
    pub files_configured: bool,
    pub output: String,
    pub check_order: bool,
    pub check_submissions: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `pslint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `PslintConfig` from the first config file present under `root`.
///
/// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
pub fn load_config(root: &Path) -> Result<Option<PslintConfig>> {
    for name in CONFIG_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| LintError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<PslintConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<PslintConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|message| LintError::Config { path, message });
    }
    Ok(None)
}

/// Expand glob patterns relative to `root`, keeping pattern order and
/// sorting matches within each pattern.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for pat in patterns {
        let abs = root.join(pat).to_string_lossy().to_string();
        let entries = glob::glob(&abs).map_err(|source| LintError::Glob {
            pattern: pat.clone(),
            source,
        })?;
        let mut matched: Vec<PathBuf> = entries.filter_map(|e| e.ok()).collect();
        matched.sort();
        for p in matched {
            if !out.contains(&p) {
                out.push(p);
            }
        }
    }
    Ok(out)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// Paths given on the command line are used as is; otherwise the config
/// `files` patterns are expanded.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_files: &[String],
    cli_output: Option<&str>,
    cli_check_order: Option<bool>,
    cli_check_submissions: Option<bool>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root)?.unwrap_or_default();

    let (files, files_configured) = if !cli_files.is_empty() {
        (cli_files.iter().map(PathBuf::from).collect(), true)
    } else if !cfg.files.is_empty() {
        (expand_patterns(&repo_root, &cfg.files)?, true)
    } else {
        (Vec::new(), false)
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let check_order = cli_check_order
        .or_else(|| cfg.order.as_ref().and_then(|o| o.check))
        .unwrap_or(false);
    let check_submissions = cli_check_submissions
        .or_else(|| cfg.submissions.as_ref().and_then(|s| s.check))
        .unwrap_or(false);

    Ok(Effective {
        repo_root,
        files,
        files_configured,
        output,
        check_order,
        check_submissions,
    })
}
