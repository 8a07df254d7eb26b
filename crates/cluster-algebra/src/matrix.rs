//! Row/column-labelled integer matrix for exchange data.
//!
//! Rows are mutable labels followed by lamination labels; columns are the
//! mutable labels. Storage is a dense `nalgebra::DMatrix<i64>`; labels are kept
//! alongside so callers can address entries by name.

use std::fmt;

use nalgebra::DMatrix;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "MatrixRepr")]
pub struct LabeledMatrix {
    rows: Vec<String>,
    cols: Vec<String>,
    data: DMatrix<i64>,
}

/// Serialized shape: labels plus row-major entries.
#[derive(Serialize)]
struct MatrixRepr {
    rows: Vec<String>,
    cols: Vec<String>,
    entries: Vec<Vec<i64>>,
}

impl From<LabeledMatrix> for MatrixRepr {
    fn from(m: LabeledMatrix) -> Self {
        let entries = m.to_rows();
        MatrixRepr {
            rows: m.rows,
            cols: m.cols,
            entries,
        }
    }
}

impl LabeledMatrix {
    pub fn zeros(rows: Vec<String>, cols: Vec<String>) -> Self {
        let data = DMatrix::zeros(rows.len(), cols.len());
        Self { rows, cols, data }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols.len()
    }
    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }
    pub fn col_labels(&self) -> &[String] {
        &self.cols
    }
    pub fn data(&self) -> &DMatrix<i64> {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.data[(i, j)]
    }
    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, v: i64) {
        self.data[(i, j)] = v;
    }
    #[inline]
    pub(crate) fn add(&mut self, i: usize, j: usize, delta: i64) {
        self.data[(i, j)] += delta;
    }

    pub fn row_index(&self, label: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == label)
    }
    pub fn col_index(&self, label: &str) -> Option<usize> {
        self.cols.iter().position(|c| c == label)
    }

    /// Entry addressed by labels.
    pub fn entry(&self, row: &str, col: &str) -> Option<i64> {
        Some(self.get(self.row_index(row)?, self.col_index(col)?))
    }

    /// Column `j` as `(row label, entry)` pairs.
    pub fn column(&self, j: usize) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, r)| (r.as_str(), self.data[(i, j)]))
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.nrows())
            .map(|i| (0..self.ncols()).map(|j| self.data[(i, j)]).collect())
            .collect()
    }

    /// Square top block (mutable rows × mutable columns).
    pub fn mutable_block(&self) -> DMatrix<i64> {
        let m = self.nrows().min(self.ncols());
        self.data.view((0, 0), (m, m)).into_owned()
    }

    /// `B[i][j] == -B[j][i]` on the mutable block.
    pub fn is_skew_symmetric(&self) -> bool {
        let b = self.mutable_block();
        b == -b.transpose()
    }

    /// Fomin–Zelevinsky matrix mutation in direction `k` (0-based column).
    ///
    /// `b'_ij = -b_ij` if `i == k` or `j == k`, otherwise
    /// `b'_ij = b_ij + (|b_ik| b_kj + b_ik |b_kj|) / 2`. Labels of row and
    /// column `k` gain a prime.
    pub fn mutate(&self, k: usize) -> LabeledMatrix {
        let mut out = self.clone();
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                let b = self.data[(i, j)];
                out.data[(i, j)] = if i == k || j == k {
                    -b
                } else {
                    let bik = self.data[(i, k)];
                    let bkj = self.data[(k, j)];
                    b + (bik.abs() * bkj + bik * bkj.abs()) / 2
                };
            }
        }
        if k < out.rows.len() {
            out.rows[k].push('\'');
        }
        out.cols[k].push('\'');
        out
    }
}

impl fmt::Display for LabeledMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_w = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let widths: Vec<usize> = (0..self.ncols())
            .map(|j| {
                let entry_w = (0..self.nrows())
                    .map(|i| self.data[(i, j)].to_string().len())
                    .max()
                    .unwrap_or(1);
                entry_w.max(self.cols[j].len())
            })
            .collect();
        write!(f, "{:row_w$}", "")?;
        for (c, w) in self.cols.iter().zip(&widths) {
            write!(f, "  {c:>w$}")?;
        }
        for (i, r) in self.rows.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{r:<row_w$}")?;
            for (j, w) in widths.iter().enumerate() {
                write!(f, "  {:>w$}", self.data[(i, j)])?;
            }
        }
        Ok(())
    }
}
