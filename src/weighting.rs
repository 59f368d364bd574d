//! Henikoff & Henikoff (1994) sequence weights.
//!
//! ```text
//! w_i = 1/L * sum_x 1 / (k_x * n_{x,i})
//! ```
//!
//! `k_x` is the number of symbol types in column `x` and `n_{x,i}` the
//! number of sequences carrying the same symbol as sequence `i` in that
//! column. Weights of one alignment sum to one.

use log::debug;

use crate::msa::Msa;

/// Per-sequence weights of one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceWeights {
    weights: Vec<f64>,
}

impl SequenceWeights {
    /// Computes the weight of every sequence of `msa`.
    pub fn henikoff(msa: &Msa) -> Self {
        let ncol = msa.ncol();
        let mut weights = vec![0.0; msa.nseq()];
        let mut counts = [0usize; 256];

        for x in 0..ncol {
            counts.fill(0);
            for i in 0..msa.nseq() {
                counts[msa.symbol_at(i, x) as usize] += 1;
            }
            let k = msa.num_types(x);
            for (i, w) in weights.iter_mut().enumerate() {
                let n = counts[msa.symbol_at(i, x) as usize];
                *w += 1.0 / (n * k) as f64;
            }
        }

        for w in &mut weights {
            *w /= ncol as f64;
        }

        Self { weights }
    }

    /// Weight of sequence `i`.
    pub fn weight(&self, i: usize) -> f64 {
        self.weights[i]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Dumps the weights at debug level, one sequence per line.
    pub fn log_weights(&self, msa: &Msa) {
        debug!("Sequence weights:");
        for (name, w) in msa.names().iter().zip(&self.weights) {
            debug!("{:>12} {:>10.6}", name, w);
        }
    }
}
