//! Likelihood transform: natural log, then per-column z-score standardization.
//!
//! Population statistics throughout (divide by N, not N - 1). Any value the
//! log cannot take, and any column without spread, is rejected rather than
//! turned into NaN or infinity.

use ratesplit_core::errors::TransformError;
use ratesplit_core::types::{FeatureMatrix, SiteLikelihoodVector};
use statrs::statistics::Statistics;
use tracing::debug;

/// Relative standard deviation at or below which a column counts as constant.
const ZERO_VARIANCE_EPSILON: f64 = 10.0 * f64::EPSILON;

/// Log-transform and standardize per-site likelihood vectors into an
/// N × L feature matrix, rows in site order.
pub fn standardize_log_likelihoods(
    sites: &[SiteLikelihoodVector],
) -> Result<FeatureMatrix, TransformError> {
    let mut matrix = log_transform(sites)?;
    standardize_columns(&mut matrix)?;
    Ok(matrix)
}

/// Elementwise natural log. All vectors must share one non-zero length and
/// every value must be finite and strictly positive.
pub fn log_transform(sites: &[SiteLikelihoodVector]) -> Result<FeatureMatrix, TransformError> {
    let width = match sites.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(TransformError::Empty),
    };

    let mut data = Vec::with_capacity(sites.len() * width);
    for (pos, site) in sites.iter().enumerate() {
        if site.len() != width {
            return Err(TransformError::RaggedRows {
                site: pos + 1,
                expected: width,
                found: site.len(),
            });
        }
        for (column, &value) in site.values().iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(TransformError::NonPositiveLikelihood {
                    site: pos + 1,
                    column,
                    value,
                });
            }
            data.push(value.ln());
        }
    }

    FeatureMatrix::from_row_major(sites.len(), width, data).ok_or(TransformError::Empty)
}

/// Standardize each column in place to mean 0 and population variance 1.
pub fn standardize_columns(matrix: &mut FeatureMatrix) -> Result<(), TransformError> {
    if matrix.is_empty() {
        return Err(TransformError::Empty);
    }

    for column in 0..matrix.cols() {
        let mean = matrix.column(column).mean();
        let std_dev = matrix.column(column).population_std_dev();
        if !std_dev.is_finite() || std_dev <= ZERO_VARIANCE_EPSILON * mean.abs().max(1.0) {
            return Err(TransformError::ZeroVariance { column });
        }
        debug!(column, mean, std_dev, "standardizing column");
        matrix.map_column(column, |v| (v - mean) / std_dev);
    }
    Ok(())
}
