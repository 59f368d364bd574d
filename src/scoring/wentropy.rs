//! Weighted entropy score.
//!
//! ```text
//! S(x) = (1 - H_w(x)) * (1 - gap(x) / nseq)
//! H_w(x) = -1/ln(min(K, N)) * sum_a p_a ln p_a,   p_a = sum of weights showing a
//! ```

use super::{sequence_weights, weighted_entropy, ColumnScorer, ColumnScores, ScoringResult};
use crate::msa::Msa;

#[derive(Debug, Clone, Default)]
pub struct WeightedEntropy {
    verbose: bool,
}

impl WeightedEntropy {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ColumnScorer for WeightedEntropy {
    fn name(&self) -> &'static str {
        "wentropy"
    }

    fn describe(&self) -> String {
        "Score is based on wentropy + gap counts: S = (1 - wentropy) * (1 - gap_freq)".to_string()
    }

    fn compute_scores(&self, msa: &Msa) -> ScoringResult<ColumnScores> {
        let weights = sequence_weights(msa, self.verbose);
        let entropy = weighted_entropy(msa, &weights)?;

        let scores = entropy
            .iter()
            .enumerate()
            .map(|(x, h)| (1.0 - h) * (1.0 - msa.gap_frequency(x)))
            .collect();
        ColumnScores::new(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringError;

    #[test]
    fn test_single_substitution_lowers_score() {
        let msa = Msa::from_rows(&["AAA", "AAA", "AAT"]).unwrap();
        let scores = WeightedEntropy::default().compute_scores(&msa).unwrap();
        let scores = scores.as_slice();

        assert_eq!(scores[0], 1.0);
        assert_eq!(scores[1], 1.0);
        assert!(scores[2] < 1.0);
        assert!(scores[2] > 0.0);
    }

    #[test]
    fn test_expected_value() {
        let msa = Msa::from_rows(&["AAA", "AAA", "AAT"]).unwrap();
        let scores = WeightedEntropy::default().compute_scores(&msa).unwrap();

        // Weights: A rows (1/3 + 1/3 + 1/4) / 3 each, T row (1/3 + 1/3 + 1/2) / 3.
        let p_t: f64 = (1.0 / 3.0 + 1.0 / 3.0 + 1.0 / 2.0) / 3.0;
        let p_a: f64 = 1.0 - p_t;
        let h = -(p_a * p_a.ln() + p_t * p_t.ln()) / 2f64.ln();
        assert!((scores.as_slice()[2] - (1.0 - h)).abs() < 1e-12);
    }

    #[test]
    fn test_all_gap_column_scores_zero() {
        let msa = Msa::from_rows(&["A-C", "A-C", "T-C"]).unwrap();
        let scores = WeightedEntropy::default().compute_scores(&msa).unwrap();
        assert_eq!(msa.gap_frequency(1), 1.0);
        assert_eq!(scores.as_slice()[1], 0.0);
    }

    #[test]
    fn test_partial_gaps_scale_score() {
        let msa = Msa::from_rows(&["AC", "AC", "-T", "AT"]).unwrap();
        let scores = WeightedEntropy::default().compute_scores(&msa).unwrap();
        // Column 0 is not single-symbol, but it cannot beat the gap-free share.
        assert!(scores.as_slice()[0] <= 0.75);
    }

    #[test]
    fn test_single_sequence_is_degenerate() {
        let msa = Msa::from_rows(&["ACDE"]).unwrap();
        assert!(matches!(
            WeightedEntropy::default().compute_scores(&msa),
            Err(ScoringError::TooFewOutcomes { .. })
        ));
    }

    #[test]
    fn test_repeatable() {
        let msa = Msa::from_rows(&["ACDE-", "ACDF-", "GCHEK", "AC-EK"]).unwrap();
        let strategy = WeightedEntropy::default();
        assert_eq!(
            strategy.compute_scores(&msa).unwrap(),
            strategy.compute_scores(&msa).unwrap()
        );
    }
}
