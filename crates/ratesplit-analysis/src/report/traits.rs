//! The parse capability shared by both report layouts.

use std::path::Path;

use ratesplit_core::config::ReportFormat;
use ratesplit_core::errors::ReportError;

use super::types::ParsedReport;

/// Converts raw report text into per-site likelihood vectors.
///
/// Implementations must keep site order exactly as written: the first data
/// row is site 1.
pub trait ReportParser: Send + Sync {
    /// The report layout this parser reads.
    fn format(&self) -> ReportFormat;

    /// Parse report text. `origin` names the source in error messages.
    fn parse_str(&self, content: &str, origin: &str) -> Result<ParsedReport, ReportError>;

    /// Read and parse a report file.
    fn parse_file(&self, path: &Path) -> Result<ParsedReport, ReportError> {
        let content = super::read_report(path)?;
        self.parse_str(&content, &path.display().to_string())
    }
}
