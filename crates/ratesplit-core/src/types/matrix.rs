//! Dense row-major feature matrix.

use serde::{Deserialize, Serialize};

/// A rows × columns matrix of `f64`, stored row-major.
///
/// Rows are sites in report order; columns are features. The transform
/// stage produces it standardized; the clusterer reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureMatrix")]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through `from_row_major`.
#[derive(Deserialize)]
struct RawFeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawFeatureMatrix> for FeatureMatrix {
    type Error = String;

    fn try_from(raw: RawFeatureMatrix) -> Result<Self, Self::Error> {
        let len = raw.data.len();
        Self::from_row_major(raw.rows, raw.cols, raw.data).ok_or_else(|| {
            format!("{} x {} matrix cannot hold {len} values", raw.rows, raw.cols)
        })
    }
}

impl FeatureMatrix {
    /// Build a matrix from row-major data. Returns `None` when the data
    /// length is not `rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Build a matrix from equal-length rows. Returns `None` for ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn row(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.cols..(idx + 1) * self.cols]
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact panics on a zero chunk size.
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Iterate the values of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |r| self.data[r * self.cols + col])
    }

    /// Apply `f` to every value of one column in place.
    pub fn map_column(&mut self, col: usize, mut f: impl FnMut(f64) -> f64) {
        let cols = self.cols;
        for r in 0..self.rows {
            let cell = &mut self.data[r * cols + col];
            *cell = f(*cell);
        }
    }
}
