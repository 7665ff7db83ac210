use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{GyreError, Result};

// ---------------------------------------------------------------------------
// ComplexTable – row-major table of complex samples
// ---------------------------------------------------------------------------

/// A dense row-major table of complex values.
///
/// Eigenfunction `y` data is stored this way: one row per grid point, one
/// column per dependent variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexTable {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl ComplexTable {
    /// Wrap flat row-major data. Fails when `data` does not hold exactly
    /// `rows * cols` values.
    pub fn from_flat(name: &str, rows: usize, cols: usize, data: Vec<Complex64>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(GyreError::shape_mismatch(name, expected, data.len()));
        }
        Ok(ComplexTable { rows, cols, data })
    }

    /// Build a table from nested rows, all of which must have the same width.
    /// An empty row list gives a 0×1 table.
    pub fn from_rows(name: &str, rows: Vec<Vec<Complex64>>) -> Result<Self> {
        let cols = rows.first().map_or(1, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(GyreError::shape_mismatch(name, cols, row.len()));
            }
            data.extend(row);
        }
        Ok(ComplexTable {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// A single-column table.
    pub fn from_column(column: Vec<Complex64>) -> Self {
        ComplexTable {
            rows: column.len(),
            cols: 1,
            data: column,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> Option<&[Complex64]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Copy out column `j` (one dependent variable across the whole grid).
    pub fn column(&self, j: usize) -> Option<Vec<Complex64>> {
        if j >= self.cols {
            return None;
        }
        Some(
            (0..self.rows)
                .map(|i| self.data[i * self.cols + j])
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }
}

// ---------------------------------------------------------------------------
// EigenvalueTable – the contents of a GYRE summary (eigenvalue) file
// ---------------------------------------------------------------------------

/// Mode eigenvalues, sorted by ascending real frequency.
///
/// `l`, `freq`, `n_p`, `n_g`, `n_cowl` and `e` are row-aligned: index `i`
/// of each describes the same mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvalueTable {
    /// Radial point count of the stellar model.
    pub n: usize,
    /// Angular degree, one entry per mode.
    pub l: Vec<i64>,
    pub freq: Vec<Complex64>,
    pub freq_units: String,
    pub n_p: Vec<i64>,
    pub n_g: Vec<i64>,
    /// Cowling classification index, `n_p - n_g`.
    pub n_cowl: Vec<i64>,
    /// Mode energy.
    #[serde(rename = "E")]
    pub e: Vec<f64>,
}

/// One row of an [`EigenvalueTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode {
    pub l: i64,
    pub freq: Complex64,
    pub n_p: i64,
    pub n_g: i64,
    pub n_cowl: i64,
    pub e: f64,
}

impl EigenvalueTable {
    /// Number of modes.
    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    pub fn mode(&self, i: usize) -> Option<Mode> {
        if i >= self.len() {
            return None;
        }
        Some(Mode {
            l: self.l[i],
            freq: self.freq[i],
            n_p: self.n_p[i],
            n_g: self.n_g[i],
            n_cowl: self.n_cowl[i],
            e: self.e[i],
        })
    }

    /// Iterate over the modes in frequency order.
    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        (0..self.len()).filter_map(move |i| self.mode(i))
    }
}

// ---------------------------------------------------------------------------
// EigenfunctionRecord – the contents of a GYRE mode (eigenfunction) file
// ---------------------------------------------------------------------------

/// Spatial profile of a single mode, in file (increasing radius) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenfunctionRecord {
    /// Grid point count.
    pub n: usize,
    /// Number of dependent variables per grid point.
    pub n_e: usize,
    pub n_p: i64,
    pub n_g: i64,
    pub n_cowl: i64,
    pub lambda_0: f64,
    pub l: i64,
    pub freq: Complex64,
    pub freq_units: String,
    /// Normalized radial coordinate.
    pub x: Vec<f64>,
    /// Dependent variables, one row per entry of `x`.
    pub y: ComplexTable,
    #[serde(rename = "dE_dx")]
    pub de_dx: Vec<f64>,
}

impl EigenfunctionRecord {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn table_rows_and_columns() {
        let table = ComplexTable::from_rows(
            "y",
            vec![vec![c(1.0, 0.0), c(2.0, 1.0)], vec![c(3.0, 0.0), c(4.0, -1.0)]],
        )
        .unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.row(1).unwrap(), &[c(3.0, 0.0), c(4.0, -1.0)]);
        assert_eq!(table.column(1).unwrap(), vec![c(2.0, 1.0), c(4.0, -1.0)]);
        assert!(table.row(2).is_none());
        assert!(table.column(2).is_none());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = ComplexTable::from_rows("y", vec![vec![c(1.0, 0.0)], vec![]]).unwrap_err();
        assert!(matches!(
            err,
            GyreError::ShapeMismatch { expected: 1, found: 0, .. }
        ));
    }

    #[test]
    fn flat_data_must_fill_the_shape() {
        assert!(ComplexTable::from_flat("y", 2, 2, vec![c(0.0, 0.0); 3]).is_err());
        let table = ComplexTable::from_flat("y", 0, 6, Vec::new()).unwrap();
        assert_eq!(table.n_rows(), 0);
    }

    #[test]
    fn modes_follow_row_order() {
        let table = EigenvalueTable {
            n: 100,
            l: vec![1, 1],
            freq: vec![c(1.0, 0.0), c(2.0, 0.0)],
            freq_units: "UHZ".into(),
            n_p: vec![2, 3],
            n_g: vec![1, 0],
            n_cowl: vec![1, 3],
            e: vec![0.5, 0.25],
        };
        let modes: Vec<Mode> = table.modes().collect();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[1].n_cowl, 3);
        assert_eq!(modes[1].e, 0.25);
        assert!(table.mode(2).is_none());
    }
}
