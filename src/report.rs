use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::injector::{Outcome, Summary};

pub fn write_header<W: Write>(out: &mut W, found: usize) -> Result<()> {
    writeln!(out, "Found {} files to update...", found)?;
    Ok(())
}

pub fn write_outcome<W: Write>(out: &mut W, path: &Path, outcome: &Outcome) -> Result<()> {
    let path = path.display();
    match outcome {
        Outcome::Updated { line } => writeln!(out, "[OK] Added import: {} -> {}", path, line)?,
        Outcome::AlreadyPresent => writeln!(out, "[SKIP] Already has import: {}", path)?,
        Outcome::NoImports => writeln!(out, "[WARN] No imports found in: {}", path)?,
        Outcome::OutsideLayout { depth } => writeln!(
            out,
            "[WARN] Too shallow for the expected layout (depth {}): {}",
            depth, path
        )?,
        Outcome::Failed(err) => writeln!(out, "[ERROR] Error processing {}: {:#}", path, err)?,
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[DONE] updated={}, skipped={}, warnings={}, errors={} ({} files)",
        summary.updated, summary.skipped, summary.warnings, summary.errors, summary.found
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: Outcome) -> String {
        let mut out = Vec::new();
        write_outcome(&mut out, Path::new("lib/features/a/b.dart"), &outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn status_lines() {
        assert_eq!(
            render(Outcome::Updated {
                line: "import 'x.dart';".into()
            }),
            "[OK] Added import: lib/features/a/b.dart -> import 'x.dart';\n"
        );
        assert_eq!(
            render(Outcome::AlreadyPresent),
            "[SKIP] Already has import: lib/features/a/b.dart\n"
        );
        assert_eq!(
            render(Outcome::NoImports),
            "[WARN] No imports found in: lib/features/a/b.dart\n"
        );
        assert!(render(Outcome::OutsideLayout { depth: 1 }).starts_with("[WARN] Too shallow"));
    }

    #[test]
    fn error_line_includes_context_chain() {
        let err = anyhow::anyhow!("permission denied").context("failed to read lib/features/a/b.dart");
        let line = render(Outcome::Failed(err));
        assert_eq!(
            line,
            "[ERROR] Error processing lib/features/a/b.dart: failed to read lib/features/a/b.dart: permission denied\n"
        );
    }

    #[test]
    fn summary_block() {
        let mut out = Vec::new();
        let summary = Summary {
            found: 5,
            updated: 2,
            skipped: 1,
            warnings: 1,
            errors: 1,
        };
        write_summary(&mut out, &summary).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n[DONE] updated=2, skipped=1, warnings=1, errors=1 (5 files)\n"
        );
    }
}
