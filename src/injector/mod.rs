use anyhow::{Context, Result, anyhow, bail};
use glob::{GlobError, MatchOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::report;

pub mod depth;
pub mod splice;

use depth::{directory_depth, normalize, relative_prefix};
use splice::{import_end_index, render_import, split_lines, splice_import};

/// What happened to a single file.
#[derive(Debug)]
pub enum Outcome {
    Updated { line: String },
    AlreadyPresent,
    NoImports,
    OutsideLayout { depth: usize },
    Failed(anyhow::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub updated: usize,
    pub skipped: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Updated { .. } => self.updated += 1,
            Outcome::AlreadyPresent => self.skipped += 1,
            Outcome::NoImports | Outcome::OutsideLayout { .. } => self.warnings += 1,
            Outcome::Failed(_) => self.errors += 1,
        }
    }
}

/// Expand the configured pattern below `cfg.root`.
///
/// Entries that could not be read while walking come back as `Err` so the
/// caller can report them alongside the regular files.
pub fn collect_files(cfg: &AppConfig) -> Result<Vec<Result<PathBuf, GlobError>>> {
    // `glob` yields paths without `./`; an empty root is the current dir.
    let root = normalize(&cfg.root);
    let pattern = if root.as_os_str().is_empty() {
        cfg.pattern.clone()
    } else {
        let root = root
            .to_str()
            .ok_or_else(|| anyhow!("root is not valid UTF-8: {}", cfg.root.display()))?;
        format!(
            "{}/{}",
            glob::Pattern::escape(root.trim_end_matches(['/', '\\'])),
            cfg.pattern
        )
    };

    // Leading dots must be matched literally, as with shell globbing.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = glob::glob_with(&pattern, options)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?;
    Ok(paths.collect())
}

/// Read, check, splice and write back one file.
pub fn process_file(path: &Path, cfg: &AppConfig) -> Result<Outcome> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    if content.contains(&cfg.marker) {
        return Ok(Outcome::AlreadyPresent);
    }

    let lines = split_lines(&content);
    let Some(index) = import_end_index(&lines, &cfg.import_pattern) else {
        return Ok(Outcome::NoImports);
    };

    let Some(depth) = directory_depth(path, &cfg.root) else {
        bail!("{} is not below root {}", path.display(), cfg.root.display());
    };
    let Some(prefix) = relative_prefix(depth, cfg.depth_offset) else {
        return Ok(Outcome::OutsideLayout { depth });
    };

    let line = render_import(&cfg.keyword, &prefix, &cfg.target);
    tracing::debug!(path = %path.display(), index, depth, "inserting import");
    let updated = splice_import(&lines, index, &line);

    fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(Outcome::Updated { line })
}

/// Run the injector over every matching file, writing status lines to `out`.
///
/// Per-file failures are reported and counted; only a bad pattern or a
/// broken `out` writer aborts the run.
pub fn inject_tree<W: Write>(cfg: &AppConfig, out: &mut W) -> Result<Summary> {
    let entries = collect_files(cfg)?;
    tracing::info!(root = %cfg.root.display(), pattern = %cfg.pattern, "scan start");
    report::write_header(out, entries.len())?;

    let mut summary = Summary {
        found: entries.len(),
        ..Summary::default()
    };

    for entry in entries {
        let (path, outcome) = match entry {
            Ok(path) => {
                let outcome = process_file(&path, cfg).unwrap_or_else(Outcome::Failed);
                (path, outcome)
            }
            Err(err) => {
                let path = err.path().to_path_buf();
                let cause = anyhow::Error::new(std::io::Error::from(err))
                    .context(format!("failed to read {}", path.display()));
                (path, Outcome::Failed(cause))
            }
        };
        summary.record(&outcome);
        report::write_outcome(out, &path, &outcome)?;
    }

    report::write_summary(out, &summary)?;
    tracing::info!(
        "injection finished: updated={}, skipped={}, warnings={}, errors={}",
        summary.updated,
        summary.skipped,
        summary.warnings,
        summary.errors
    );
    Ok(summary)
}
