//! Jensen-Shannon divergence score.
//!
//! Weighted column probabilities `p` are smoothed with pseudo-counts so that
//! no symbol has probability zero, then compared with the background
//! distribution `q` of the whole alignment:
//!
//! ```text
//! r    = λ p + (1 - λ) q
//! D(x) = λ R(p, r) + (1 - λ) R(q, r)      R = relative entropy, log base 2
//! S(x) = D(x) * (1 - gap(x) / nseq)
//! ```
//!
//! with `λ = 0.5`. `D` lies in `[0, 1]`: a column that looks like the
//! background scores near 0, a column dominated by rare symbols scores high.

use ndarray::ArrayView1;

use super::{sequence_weights, ColumnProfile, ColumnScorer, ColumnScores, ScoringResult};
use crate::msa::Msa;

/// Mixing weight of the column distribution.
pub const MIXTURE_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct JensenShannon {
    verbose: bool,
}

impl JensenShannon {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Smoothed weighted probabilities of every column.
    pub fn smoothed_profile(&self, msa: &Msa) -> ColumnProfile {
        let weights = sequence_weights(msa, self.verbose);
        let mut profile = ColumnProfile::weighted(msa, &weights);
        profile.smooth();
        profile
    }
}

/// Jensen-Shannon divergence of two distributions over the same support.
pub fn divergence(p: ArrayView1<'_, f64>, q: &[f64]) -> f64 {
    let mut d = 0.0;
    for (&pa, &qa) in p.iter().zip(q) {
        let r = MIXTURE_WEIGHT * pa + (1.0 - MIXTURE_WEIGHT) * qa;
        if pa > 0.0 {
            d += MIXTURE_WEIGHT * pa * (pa / r).log2();
        }
        if qa > 0.0 {
            d += (1.0 - MIXTURE_WEIGHT) * qa * (qa / r).log2();
        }
    }
    d.clamp(0.0, 1.0)
}

impl ColumnScorer for JensenShannon {
    fn name(&self) -> &'static str {
        "jensen"
    }

    fn describe(&self) -> String {
        format!(
            "Score is based on Jensen-Shannon measure: S = λ R(p,r) + (1 - λ) R(q,r), λ = {}",
            MIXTURE_WEIGHT
        )
    }

    fn compute_scores(&self, msa: &Msa) -> ScoringResult<ColumnScores> {
        let profile = self.smoothed_profile(msa);
        let background = msa.frequencies();

        let scores = (0..msa.ncol())
            .map(|x| divergence(profile.column(x), background) * (1.0 - msa.gap_frequency(x)))
            .collect();
        ColumnScores::new(scores)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::*;

    #[test]
    fn test_divergence_bounds() {
        let p = arr1(&[0.5, 0.5]);
        assert_eq!(divergence(p.view(), &[0.5, 0.5]), 0.0);

        let p = arr1(&[1.0, 0.0]);
        assert!((divergence(p.view(), &[0.0, 1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_smoothed_columns_sum_to_one() {
        let msa = Msa::from_rows(&["ACDE-", "ACDF-", "GCHEK", "AC-EK", "AC-EK"]).unwrap();
        let profile = JensenShannon::default().smoothed_profile(&msa);
        for x in 0..msa.ncol() {
            assert!((profile.column(x).sum() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let msa = Msa::from_rows(&["ACDE-", "ACDF-", "GCHEK", "AC-EK"]).unwrap();
        let scores = JensenShannon::default().compute_scores(&msa).unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores.as_slice().iter().all(|&s| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_conserved_column_beats_variable_column() {
        let msa = Msa::from_rows(&["WAA", "WCC", "WDD", "WEE"]).unwrap();
        let scores = JensenShannon::default().compute_scores(&msa).unwrap();
        assert!(scores.as_slice()[0] > scores.as_slice()[1]);
    }

    #[test]
    fn test_all_gap_column_scores_zero() {
        let msa = Msa::from_rows(&["A-C", "A-C", "T-C"]).unwrap();
        let scores = JensenShannon::default().compute_scores(&msa).unwrap();
        assert_eq!(scores.as_slice()[1], 0.0);
    }

    #[test]
    fn test_repeatable() {
        let msa = Msa::from_rows(&["ACDE-", "ACDF-", "GCHEK", "AC-EK"]).unwrap();
        let strategy = JensenShannon::default();
        assert_eq!(
            strategy.compute_scores(&msa).unwrap(),
            strategy.compute_scores(&msa).unwrap()
        );
    }
}
