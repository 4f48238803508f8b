//! PhyML `*_phyml_lk.txt` parser.
//!
//! A report is a free-text note, a header row, then one whitespace-delimited
//! row per site:
//!
//! ```text
//! Site   P(D|M)        P(D|M,rr[1]=2.6534)  ...  P(D|M,rr[4]=1.0697)  Posterior mean
//! 1      2.07027e-12   1.3895e-19           ...  1.21786e-15          0.273422
//! ```
//!
//! The note is longer when PhyML estimated rate categories; its second line
//! then opens with `P(D|M,rr[x])`. That line is the layout discriminator.
//!
//! # Column order (`PHYML_COLUMN_ORDER`)
//!
//! Header composition varies run to run (category count, the `=rate` suffix
//! on each category name), so columns are addressed by name, never by file
//! position. Header names are sorted by a canonical key (site index, overall
//! likelihood, rate categories by class number, then any other column by name)
//! and selected by relative position in that order:
//!
//! - first two: site index and overall site likelihood
//! - last two: summary columns (`Posterior`, `mean`), excluded
//! - everything in between: rate-category likelihoods
//!
//! With fewer than four columns there are no rate categories. A rate-category
//! column landing in a summary position, or a non-category column landing in
//! a category position, rejects the report instead of misreading it.

use ratesplit_core::config::ReportFormat;
use ratesplit_core::constants::MAX_REPORT_SITES;
use ratesplit_core::errors::ReportError;
use ratesplit_core::types::collections::FxHashMap;
use ratesplit_core::types::SiteLikelihoodVector;
use tracing::debug;

use super::traits::ReportParser;
use super::types::{ParsedReport, ReportLayout};

/// First token of the header row.
const HEADER_MARKER: &str = "Site";
/// Overall site likelihood column.
const SITE_LIKELIHOOD_COLUMN: &str = "P(D|M)";
/// Prefix of every rate-category column, e.g. `P(D|M,rr[2]=0.2289)`.
const RATE_CATEGORY_PREFIX: &str = "P(D|M,rr[";
/// Second-line prefix that marks the rate-category note.
const RATE_NOTE_MARKER: char = 'P';
/// Header columns needed before any can be rate categories.
const MIN_RATE_CATEGORY_HEADER: usize = 4;
/// Trailing summary columns excluded from the rate categories.
const SUMMARY_COLUMNS: usize = 2;

/// Parser for PhyML per-site likelihood reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhymlParser;

/// Role of a header column, ordered as `PHYML_COLUMN_ORDER` sorts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ColumnKind {
    SiteIndex,
    SiteLikelihood,
    RateCategory(u32),
    Summary,
}

fn classify(name: &str) -> ColumnKind {
    if name == HEADER_MARKER {
        return ColumnKind::SiteIndex;
    }
    if name == SITE_LIKELIHOOD_COLUMN {
        return ColumnKind::SiteLikelihood;
    }
    name.strip_prefix(RATE_CATEGORY_PREFIX)
        .and_then(|rest| rest.split(']').next())
        .and_then(|class| class.parse::<u32>().ok())
        .map(ColumnKind::RateCategory)
        .unwrap_or(ColumnKind::Summary)
}

/// Sort header names into `PHYML_COLUMN_ORDER`.
pub fn canonical_column_order<'a>(names: &[&'a str]) -> Vec<&'a str> {
    let mut sorted = names.to_vec();
    sorted.sort_by(|a, b| (classify(a), *a).cmp(&(classify(b), *b)));
    sorted
}

/// Columns picked out of a sorted header.
#[derive(Debug, PartialEq)]
struct ColumnSelection<'a> {
    site_likelihood: &'a str,
    rate_categories: Vec<&'a str>,
}

fn select_columns<'a>(sorted: &[&'a str]) -> Result<ColumnSelection<'a>, String> {
    if sorted.len() < 2
        || classify(sorted[0]) != ColumnKind::SiteIndex
        || classify(sorted[1]) != ColumnKind::SiteLikelihood
    {
        return Err(format!(
            "header must name '{HEADER_MARKER}' and '{SITE_LIKELIHOOD_COLUMN}' columns"
        ));
    }

    if sorted.len() < MIN_RATE_CATEGORY_HEADER {
        return Ok(ColumnSelection {
            site_likelihood: sorted[1],
            rate_categories: Vec::new(),
        });
    }

    let tail_start = sorted.len() - SUMMARY_COLUMNS;
    let rate_categories = sorted[2..tail_start].to_vec();
    if let Some(bad) = rate_categories
        .iter()
        .find(|c| !matches!(classify(c), ColumnKind::RateCategory(_)))
    {
        return Err(format!("column '{bad}' sits in a rate-category position"));
    }
    if let Some(bad) = sorted[tail_start..]
        .iter()
        .find(|c| matches!(classify(c), ColumnKind::RateCategory(_)))
    {
        return Err(format!("rate-category column '{bad}' sits in a summary position"));
    }

    Ok(ColumnSelection {
        site_likelihood: sorted[1],
        rate_categories,
    })
}

/// One data row viewed as a column-name → value mapping.
struct SiteRecord<'h, 'a> {
    index: &'h FxHashMap<&'a str, usize>,
    fields: Vec<&'a str>,
    line: usize,
}

impl<'h, 'a> SiteRecord<'h, 'a> {
    fn new(index: &'h FxHashMap<&'a str, usize>, line: usize, text: &'a str) -> Self {
        Self {
            index,
            fields: text.split_whitespace().collect(),
            line,
        }
    }

    fn value(&self, column: &str, origin: &str) -> Result<f64, ReportError> {
        let raw = self
            .index
            .get(column)
            .and_then(|&i| self.fields.get(i))
            .ok_or_else(|| ReportError::Malformed {
                path: origin.to_string(),
                line: self.line,
                message: format!(
                    "row has {} fields, no value for column '{column}'",
                    self.fields.len()
                ),
            })?;
        raw.parse::<f64>().map_err(|_| ReportError::InvalidNumber {
            path: origin.to_string(),
            line: self.line,
            field: column.to_string(),
            value: raw.to_string(),
        })
    }
}

impl PhymlParser {
    /// Decide the preamble layout from the report's second line.
    pub fn detect_layout(second_line: &str) -> ReportLayout {
        if second_line.starts_with(RATE_NOTE_MARKER) {
            ReportLayout::RateCategoryReport
        } else {
            ReportLayout::SimpleReport
        }
    }
}

impl ReportParser for PhymlParser {
    fn format(&self) -> ReportFormat {
        ReportFormat::Phyml
    }

    fn parse_str(&self, content: &str, origin: &str) -> Result<ParsedReport, ReportError> {
        let malformed = |line: usize, message: String| ReportError::Malformed {
            path: origin.to_string(),
            line,
            message,
        };

        let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));

        lines
            .next()
            .ok_or_else(|| malformed(1, "report is empty".to_string()))?;
        let (_, second) = lines
            .next()
            .ok_or_else(|| malformed(2, "report ends before its second line".to_string()))?;
        let layout = Self::detect_layout(second);

        let extra = layout.extra_preamble_lines();
        for n in 0..extra {
            lines
                .next()
                .ok_or_else(|| malformed(3 + n, "report ends inside its preamble".to_string()))?;
        }

        let (header_line, header) = lines
            .by_ref()
            .find(|(_, l)| !l.trim().is_empty())
            .ok_or_else(|| malformed(3 + extra, "missing header row".to_string()))?;
        if !header.trim_start().starts_with(HEADER_MARKER) {
            return Err(malformed(
                header_line,
                format!("expected header row starting with '{HEADER_MARKER}'"),
            ));
        }

        let names: Vec<&str> = header.split_whitespace().collect();
        let index: FxHashMap<&str, usize> =
            names.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        if index.len() != names.len() {
            return Err(malformed(header_line, "duplicate header column".to_string()));
        }
        let sorted = canonical_column_order(&names);
        let selection = select_columns(&sorted).map_err(|msg| malformed(header_line, msg))?;

        let rows: Vec<(usize, &str)> = lines.filter(|(_, l)| !l.trim().is_empty()).collect();
        if rows.len() > MAX_REPORT_SITES {
            return Err(ReportError::RowCountExceeded {
                path: origin.to_string(),
                rows: rows.len(),
                limit: MAX_REPORT_SITES,
            });
        }
        if rows.is_empty() {
            return Err(malformed(header_line, "report has no site rows".to_string()));
        }

        let mut site_likelihoods = Vec::with_capacity(rows.len());
        let mut rate_categories =
            (!selection.rate_categories.is_empty()).then(|| Vec::with_capacity(rows.len()));

        for (line, text) in rows {
            let record = SiteRecord::new(&index, line, text);
            site_likelihoods.push(SiteLikelihoodVector::single(
                record.value(selection.site_likelihood, origin)?,
            ));
            if let Some(rates) = rate_categories.as_mut() {
                let values = selection
                    .rate_categories
                    .iter()
                    .map(|column| record.value(column, origin))
                    .collect::<Result<Vec<f64>, _>>()?;
                rates.push(SiteLikelihoodVector::from(values));
            }
        }

        debug!(
            origin,
            ?layout,
            sites = site_likelihoods.len(),
            rate_categories = selection.rate_categories.len(),
            "parsed PhyML report"
        );

        Ok(ParsedReport {
            layout,
            site_likelihoods,
            rate_categories,
        })
    }
}
