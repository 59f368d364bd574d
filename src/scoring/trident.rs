//! Trident score (Valdar 2002).
//!
//! ```text
//! S(x) = (1 - t(x))^a * (1 - r(x))^b * (1 - g(x))^c
//! ```
//!
//! - `t`: weighted entropy of the column
//! - `r`: spread of the column residues in substitution-matrix space
//! - `g`: fraction of gaps
//!
//! For `r`, every residue `s` present in column `x` is mapped to the vector
//! `X_s = [M(a_1, s), ..., M(a_K, s)]` of its normalized scores against the
//! `K` matrix symbols. `r(x)` is the mean distance of those vectors from
//! their centroid, divided by `sqrt(K * (max(M) - min(M))^2)`.

use log::{info, warn};
use ndarray::Array1;

use super::{sequence_weights, weighted_entropy, ColumnScorer, ColumnScores, ScoringResult};
use crate::config::{Options, TridentExponents};
use crate::matrix::SubstitutionMatrix;
use crate::model::is_gap;
use crate::msa::Msa;

/// The three per-column terms before blending.
#[derive(Debug, Clone, PartialEq)]
pub struct TridentTerms {
    pub entropy: Vec<f64>,
    pub dissimilarity: Vec<f64>,
    pub gaps: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Trident {
    matrix: SubstitutionMatrix,
    exponents: TridentExponents,
    verbose: bool,
}

impl Trident {
    pub fn new(matrix: SubstitutionMatrix, exponents: TridentExponents, verbose: bool) -> Self {
        Self {
            matrix,
            exponents,
            verbose,
        }
    }

    /// Loads the substitution matrix named by `options`.
    pub fn from_options(options: &Options) -> ScoringResult<Self> {
        let path = options.matrix_path();
        info!("Loading substitution matrix {}", path.display());
        let matrix = SubstitutionMatrix::load(&path)?;
        Ok(Self::new(matrix, options.exponents, options.verbose))
    }

    /// Computes `t`, `r` and `g` for every column.
    pub fn terms(&self, msa: &Msa) -> ScoringResult<TridentTerms> {
        let weights = sequence_weights(msa, self.verbose);
        let entropy = weighted_entropy(msa, &weights)?;
        let dissimilarity = self.dissimilarity(msa);
        let gaps = (0..msa.ncol()).map(|x| msa.gap_frequency(x)).collect();

        Ok(TridentTerms {
            entropy,
            dissimilarity,
            gaps,
        })
    }

    fn dissimilarity(&self, msa: &Msa) -> Vec<f64> {
        let alphabet = self.matrix.alphabet();
        if !msa.is_subset_of(alphabet) {
            let missing: String = msa
                .alphabet()
                .iter()
                .filter(|&&s| !is_gap(s) && !alphabet.contains(&s))
                .map(|&s| s as char)
                .collect();
            warn!(
                "Symbols '{}' are not in the substitution matrix and are ignored for residue similarity",
                missing
            );
        }

        let mut restricted = msa.clone();
        restricted.restrict_to_alphabet(alphabet);

        let size = self.matrix.alphabet_size() as f64;
        let range = self.matrix.max() - self.matrix.min();
        let lambda = (size * range * range).sqrt();

        (0..restricted.ncol())
            .map(|x| {
                let vectors: Vec<_> = restricted
                    .type_list(x)
                    .iter()
                    .filter(|&&s| !is_gap(s))
                    .filter_map(|&s| self.matrix.score_vector(s))
                    .collect();
                if vectors.is_empty() {
                    return 1.0;
                }

                let n = vectors.len() as f64;
                let mut mean = Array1::<f64>::zeros(alphabet.len());
                for v in &vectors {
                    mean += v;
                }
                mean /= n;

                let spread: f64 = vectors
                    .iter()
                    .map(|v| (&mean - v).mapv(|d| d * d).sum().sqrt())
                    .sum();
                spread / n / lambda
            })
            .collect()
    }
}

impl ColumnScorer for Trident {
    fn name(&self) -> &'static str {
        "trident"
    }

    fn describe(&self) -> String {
        format!(
            "Score is based on trident score defined by Valdar (2002): \
             S = (1 - t)^a * (1 - r)^b * (1 - g)^c with a = {}, b = {}, c = {} \
             (t: entropy, r: residue similarity, g: gap frequency)",
            self.exponents.a, self.exponents.b, self.exponents.c
        )
    }

    fn compute_scores(&self, msa: &Msa) -> ScoringResult<ColumnScores> {
        let terms = self.terms(msa)?;
        let TridentExponents { a, b, c } = self.exponents;

        let scores = (0..msa.ncol())
            .map(|x| {
                // Clamp: rounding may push a term a hair above 1.
                let t = (1.0 - terms.entropy[x]).max(0.0);
                let r = (1.0 - terms.dissimilarity[x]).max(0.0);
                let g = (1.0 - terms.gaps[x]).max(0.0);
                t.powf(a) * r.powf(b) * g.powf(c)
            })
            .collect();
        ColumnScores::new(scores)
    }
}
