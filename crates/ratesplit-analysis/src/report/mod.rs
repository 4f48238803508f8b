//! Per-site likelihood report parsers: PhyML rate-category tables and
//! RAxML single-line log-likelihood dumps.

pub mod phyml;
pub mod raxml;
pub mod traits;
pub mod types;

use std::path::Path;

use ratesplit_core::config::ReportFormat;
use ratesplit_core::errors::ReportError;

pub use phyml::PhymlParser;
pub use raxml::RaxmlParser;
pub use traits::ReportParser;
pub use types::{ParsedReport, ReportLayout};

/// Returns the parser for a report format.
pub fn parser_for(format: ReportFormat) -> Box<dyn ReportParser> {
    match format {
        ReportFormat::Phyml => Box::new(PhymlParser),
        ReportFormat::Raxml => Box::new(RaxmlParser),
    }
}

/// Read a report fully into memory. The file handle is released before
/// this returns, whatever the outcome.
///
/// A file that opens but is not UTF-8 text is malformed, not missing.
pub fn read_report(path: &Path) -> Result<String, ReportError> {
    let bytes = std::fs::read(path).map_err(|e| ReportError::NotFound {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        ReportError::Malformed {
            path: path.display().to_string(),
            line,
            message: format!("report is not UTF-8 text: {}", e.utf8_error()),
        }
    })
}
