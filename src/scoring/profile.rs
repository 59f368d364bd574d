//! Weighted symbol probabilities per column.

use ndarray::{Array2, ArrayView1};

use crate::msa::Msa;
use crate::weighting::SequenceWeights;

/// Floor given to symbols absent from a column when smoothing.
pub const PSEUDO_COUNT: f64 = 1e-6;

/// One row per alignment column, one column per alphabet symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    probabilities: Array2<f64>,
}

impl ColumnProfile {
    /// `p[x][a]` is the summed weight of the sequences carrying symbol `a`
    /// in column `x`.
    pub fn weighted(msa: &Msa, weights: &SequenceWeights) -> Self {
        let mut probabilities = Array2::zeros((msa.ncol(), msa.alphabet().len()));
        for x in 0..msa.ncol() {
            for j in 0..msa.nseq() {
                if let Some(a) = msa.alphabet_position(msa.symbol_at(j, x)) {
                    probabilities[[x, a]] += weights.weight(j);
                }
            }
        }
        Self { probabilities }
    }

    pub fn ncol(&self) -> usize {
        self.probabilities.nrows()
    }

    /// Probabilities of column `x`, in alphabet order.
    pub fn column(&self, x: usize) -> ArrayView1<'_, f64> {
        self.probabilities.row(x)
    }

    /// Unnormalized Shannon entropy `-sum p ln p` of column `x`.
    ///
    /// A column holding a single symbol is exactly 0, whatever rounding the
    /// weight sum carries.
    pub fn entropy(&self, x: usize) -> f64 {
        let row = self.probabilities.row(x);
        if row.iter().filter(|&&p| p != 0.0).count() <= 1 {
            return 0.0;
        }
        let mut h = 0.0;
        for &p in row {
            if p != 0.0 {
                h -= p * p.ln();
            }
        }
        h
    }

    /// Floors absent symbols at [`PSEUDO_COUNT`] and takes the same total
    /// back, in equal shares, from the observed symbols.
    pub fn smooth(&mut self) {
        let size = self.probabilities.ncols();
        for mut row in self.probabilities.rows_mut() {
            let absent = row.iter().filter(|&&p| p == 0.0).count();
            if absent == 0 || absent == size {
                continue;
            }
            let pseudo = absent as f64 * PSEUDO_COUNT / (size - absent) as f64;
            for p in row.iter_mut() {
                if *p == 0.0 {
                    *p = PSEUDO_COUNT;
                } else {
                    *p -= pseudo;
                }
            }
        }
    }
}
