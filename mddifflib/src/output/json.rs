//! Structured JSON dump.

use std::io::Write;

use super::Reporter;
use crate::diff::DiffReport;
use crate::Result;

/// Pretty-printed JSON with stable field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, report: &DiffReport, sink: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *sink, report)?;
        writeln!(sink)?;
        Ok(())
    }
}
