//! Columnar rendering.
//!
//! `DiffTable` is the presentation-ready form of a report: every cell is
//! already a string. Layout is left to `comfy-table`; this module only
//! decides the content and the status colors. The struct also serializes
//! cleanly for callers that want to template it themselves.

use std::io::Write;

use comfy_table::{presets, Cell, ContentArrangement, Table, TableComponent};
use console::Style;
use serde::{Deserialize, Serialize};

use super::Reporter;
use crate::diff::{DiffItem, DiffReport, DiffType};
use crate::Result;

const HEADERS: [&str; 3] = ["Status", "Path", "Details"];

/// A single table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub kind: DiffType,
    pub status: String,
    pub path: String,
    pub details: String,
}

impl TableRow {
    fn from_item(item: &DiffItem) -> Self {
        let details = match item.kind {
            DiffType::Missing => format!("Size: {} bytes", item.src_size.unwrap_or_default()),
            DiffType::Extra => format!("Size: {} bytes", item.tgt_size.unwrap_or_default()),
            DiffType::Modified => item.reason.clone().unwrap_or_default(),
        };
        Self {
            kind: item.kind,
            status: item.kind.to_string(),
            path: item.path.clone(),
            details,
        }
    }
}

/// Table-ready diff data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    /// "Summary: Missing: N, Modified: N"
    pub footer: String,
}

impl DiffTable {
    pub fn from_report(report: &DiffReport) -> Self {
        DiffTable {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: report.items.iter().map(TableRow::from_item).collect(),
            footer: format!(
                "Summary: Missing: {}, Modified: {}",
                report.summary.total_missing, report.summary.total_modified
            ),
        }
    }
}

/// Renders a report as borderless columns followed by a summary line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReporter {
    styled: bool,
}

impl TableReporter {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn status_style(&self, kind: DiffType) -> Style {
        if !self.styled {
            return Style::new();
        }
        let style = Style::new().bold().force_styling(true);
        match kind {
            DiffType::Missing => style.red(),
            DiffType::Extra => style.green(),
            DiffType::Modified => style.yellow(),
        }
    }

    /// Lay out the table body. Status cells carry escape codes when styled;
    /// `custom_styling` keeps them out of the width computation.
    fn layout(&self, table: &DiffTable) -> Table {
        let mut layout = Table::new();
        layout
            .load_preset(presets::NOTHING)
            .set_style(TableComponent::HeaderLines, '-')
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(&table.headers);

        for row in &table.rows {
            let status = self.status_style(row.kind).apply_to(&row.status);
            layout.add_row(vec![
                Cell::new(status),
                Cell::new(&row.path),
                Cell::new(&row.details),
            ]);
        }
        layout
    }
}

impl Reporter for TableReporter {
    fn report(&self, report: &DiffReport, sink: &mut dyn Write) -> Result<()> {
        let table = DiffTable::from_report(report);

        writeln!(sink, "{}", self.layout(&table))?;
        writeln!(sink)?;
        writeln!(sink, "{}", table.footer)?;
        Ok(())
    }
}
