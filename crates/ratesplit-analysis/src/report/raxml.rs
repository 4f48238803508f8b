//! RAxML `RAxML_perSiteLLs.*` parser.
//!
//! Line 1 is a count header; line 2 holds a run identifier (`tr1`) followed
//! by one base-10 log likelihood per site. Values are exponentiated back to
//! plain likelihoods so both report formats feed the same log transform.

use ratesplit_core::config::ReportFormat;
use ratesplit_core::errors::ReportError;
use ratesplit_core::types::SiteLikelihoodVector;
use tracing::debug;

use super::traits::ReportParser;
use super::types::{ParsedReport, ReportLayout};

/// Physical line carrying the per-site values.
const VALUES_LINE: usize = 2;

/// Parser for RAxML per-site log-likelihood reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaxmlParser;

impl ReportParser for RaxmlParser {
    fn format(&self) -> ReportFormat {
        ReportFormat::Raxml
    }

    fn parse_str(&self, content: &str, origin: &str) -> Result<ParsedReport, ReportError> {
        let line = content
            .lines()
            .nth(VALUES_LINE - 1)
            .ok_or_else(|| ReportError::Malformed {
                path: origin.to_string(),
                line: VALUES_LINE,
                message: "report has no per-site likelihood line".to_string(),
            })?;

        // Whitespace splitting also discards the empty field a trailing
        // delimiter leaves behind.
        let mut fields = line.split_whitespace();
        let run_id = fields.next().ok_or_else(|| ReportError::Malformed {
            path: origin.to_string(),
            line: VALUES_LINE,
            message: "per-site likelihood line is empty".to_string(),
        })?;

        let site_likelihoods = fields
            .enumerate()
            .map(|(i, raw)| {
                raw.parse::<f64>()
                    .ok()
                    .map(|log10_lk| 10f64.powf(log10_lk))
                    // Exponents below about -323 underflow to zero.
                    .filter(|lk| lk.is_finite() && *lk > 0.0)
                    .map(SiteLikelihoodVector::single)
                    .ok_or_else(|| ReportError::InvalidNumber {
                        path: origin.to_string(),
                        line: VALUES_LINE,
                        field: format!("site {}", i + 1),
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if site_likelihoods.is_empty() {
            return Err(ReportError::Malformed {
                path: origin.to_string(),
                line: VALUES_LINE,
                message: format!("run '{run_id}' lists no site likelihoods"),
            });
        }

        debug!(origin, run_id, sites = site_likelihoods.len(), "parsed RAxML report");

        Ok(ParsedReport {
            layout: ReportLayout::SimpleReport,
            site_likelihoods,
            rate_categories: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antilog_of_each_field() {
        let report = RaxmlParser
            .parse_str("  3  1\ntr1\t-3.0 -5.0 -1.0\t\n", "mem")
            .unwrap();
        let values: Vec<f64> = report.site_likelihoods.iter().map(|v| v[0]).collect();
        let expected = [1e-3, 1e-5, 1e-1];
        for (got, want) in values.iter().zip(expected) {
            assert!((got - want).abs() <= want * 1e-12, "{got} != {want}");
        }
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn run_identifier_with_digits_is_not_stripped_from_values() {
        let report = RaxmlParser.parse_str("1 1\ntr1\t-3.1 \n", "mem").unwrap();
        assert!((report.site_likelihoods[0][0] - 10f64.powf(-3.1)).abs() < 1e-15);
    }

    #[test]
    fn missing_second_line_is_malformed() {
        let err = RaxmlParser.parse_str("  3  1\n", "mem").unwrap_err();
        assert!(matches!(err, ReportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn only_run_id_is_malformed() {
        let err = RaxmlParser.parse_str("1 1\ntr1\t\n", "mem").unwrap_err();
        assert!(matches!(err, ReportError::Malformed { .. }));
    }

    #[test]
    fn underflowing_exponent_keeps_the_written_value() {
        let err = RaxmlParser
            .parse_str("3 1\ntr1 -1.0 -400.25 -2.0\n", "mem")
            .unwrap_err();
        match err {
            ReportError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "site 2");
                assert_eq!(value, "-400.25");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn overflowing_exponent_rejected() {
        let err = RaxmlParser.parse_str("1 1\ntr1 400\n", "mem").unwrap_err();
        assert!(matches!(err, ReportError::InvalidNumber { .. }));
    }

    #[test]
    fn non_numeric_field_names_site() {
        let err = RaxmlParser.parse_str("2 1\ntr1 -1.0 oops\n", "mem").unwrap_err();
        match err {
            ReportError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "site 2");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
