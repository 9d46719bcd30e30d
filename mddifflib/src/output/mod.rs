//! Output formatting: render a finished [`DiffReport`] to a sink.
//!
//! Reporters are pure consumers of the report. They never modify it and
//! carry no diffing logic. Three formats are provided:
//!
//! - **json**: structured dump of every field, readable back with
//!   [`DiffReport::from_json`]
//! - **table**: Status / Path / Details columns plus a summary line
//! - **markdown**: items grouped into Missing, Modified and Extra sections
//!
//! ## Example
//!
//! ```rust
//! use mddifflib::output::{reporter_for, OutputFormat};
//! use mddifflib::DiffReport;
//!
//! let report = DiffReport::new("/src", "/tgt");
//! let mut out = Vec::new();
//! reporter_for(OutputFormat::Table, false).report(&report, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("Summary: Missing: 0, Modified: 0"));
//! ```

pub mod json;
pub mod markdown;
pub mod table;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::diff::DiffReport;
use crate::error::MddiffError;
use crate::Result;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use table::{DiffTable, TableReporter, TableRow};

/// Renders a report to an output sink.
pub trait Reporter {
    fn report(&self, report: &DiffReport, sink: &mut dyn Write) -> Result<()>;
}

/// Recognized output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Names accepted on the command line and in config files.
    pub const NAMES: [&'static str; 4] = ["table", "json", "markdown", "human"];
}

impl FromStr for OutputFormat {
    type Err = MddiffError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "human" => Ok(OutputFormat::Markdown),
            _ => Err(MddiffError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(s)
    }
}

/// Build the reporter for a format.
///
/// `styled` enables terminal colors where the format supports them.
pub fn reporter_for(format: OutputFormat, styled: bool) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Table => Box::new(TableReporter::new(styled)),
        OutputFormat::Json => Box::new(JsonReporter),
        OutputFormat::Markdown => Box::new(MarkdownReporter),
    }
}
