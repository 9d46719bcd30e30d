//! Grouped narrative rendering in Markdown.

use std::io::Write;

use super::Reporter;
use crate::diff::{DiffItem, DiffReport, DiffType};
use crate::Result;

/// Groups items into Missing, Modified and Extra sections.
///
/// Sections with no items are left out entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    fn section(
        sink: &mut dyn Write,
        title: &str,
        items: &[&DiffItem],
        line: impl Fn(&DiffItem) -> String,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(sink, "## {title}")?;
        for item in items {
            writeln!(sink, "{}", line(*item))?;
        }
        writeln!(sink)?;
        Ok(())
    }
}

impl Reporter for MarkdownReporter {
    fn report(&self, report: &DiffReport, sink: &mut dyn Write) -> Result<()> {
        writeln!(sink, "# Diff Report")?;
        writeln!(sink)?;
        writeln!(sink, "**Source:** `{}`", report.source_dir)?;
        writeln!(sink, "**Target:** `{}`", report.target_dir)?;
        writeln!(sink)?;

        let missing: Vec<&DiffItem> = report.items_of(DiffType::Missing).collect();
        let modified: Vec<&DiffItem> = report.items_of(DiffType::Modified).collect();
        let extra: Vec<&DiffItem> = report.items_of(DiffType::Extra).collect();

        Self::section(
            sink,
            "Missing Files (In Source, Not Target)",
            &missing,
            |item| format!("- `{}` (Size: {})", item.path, item.src_size.unwrap_or_default()),
        )?;
        Self::section(sink, "Modified Files", &modified, |item| {
            format!("- `{}`: {}", item.path, item.reason.as_deref().unwrap_or_default())
        })?;
        Self::section(
            sink,
            "Extra Files (In Target, Not Source)",
            &extra,
            |item| format!("- `{}` (Size: {})", item.path, item.tgt_size.unwrap_or_default()),
        )?;
        Ok(())
    }
}
