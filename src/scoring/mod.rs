//! Column conservation scores.
//!
//! Three interchangeable strategies, all built on Henikoff sequence weights:
//! - [`WeightedEntropy`]: weighted Shannon entropy times gap-free fraction
//! - [`JensenShannon`]: divergence of the smoothed column distribution from
//!   the alignment background
//! - [`Trident`]: entropy, substitution-matrix similarity and gaps (Valdar 2002)
//!
//! [`ScoringStrategy`] is the tagged union the command line picks from.

pub mod jensen;
pub mod profile;
pub mod trident;
pub mod wentropy;

use log::info;
use thiserror::Error;

use crate::config::Options;
use crate::matrix::MatrixError;
use crate::msa::Msa;
use crate::weighting::SequenceWeights;

pub use jensen::JensenShannon;
pub use profile::ColumnProfile;
pub use trident::{Trident, TridentTerms};
pub use wentropy::WeightedEntropy;

/// Errors that can occur while scoring columns.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error(
        "Entropy cannot be normalized: min(alphabet size {alphabet}, sequence count {nseq}) must be at least 2"
    )]
    TooFewOutcomes { alphabet: usize, nseq: usize },

    #[error("Substitution matrix error: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Score of column {column} is not a finite number ({value})")]
    NonFinite { column: usize, value: f64 },
}

/// Result type for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// Final per-column scores, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScores {
    values: Vec<f64>,
}

impl ColumnScores {
    /// Wraps computed scores, rejecting NaN and infinities.
    pub fn new(values: Vec<f64>) -> ScoringResult<Self> {
        if let Some((column, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ScoringError::NonFinite { column, value });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A way of turning an alignment into one score per column.
pub trait ColumnScorer {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;

    /// The formula, for the log.
    fn describe(&self) -> String;

    fn compute_scores(&self, msa: &Msa) -> ScoringResult<ColumnScores>;
}

/// Which strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    WeightedEntropy,
    JensenShannon,
    Trident,
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statistic::WeightedEntropy => write!(f, "wentropy"),
            Statistic::JensenShannon => write!(f, "jensen"),
            Statistic::Trident => write!(f, "trident"),
        }
    }
}

/// One of the scoring strategies, ready to run.
#[derive(Debug, Clone)]
pub enum ScoringStrategy {
    WeightedEntropy(WeightedEntropy),
    JensenShannon(JensenShannon),
    Trident(Trident),
}

impl ScoringStrategy {
    /// Builds the strategy, loading the substitution matrix for Trident.
    pub fn from_options(statistic: Statistic, options: &Options) -> ScoringResult<Self> {
        Ok(match statistic {
            Statistic::WeightedEntropy => {
                ScoringStrategy::WeightedEntropy(WeightedEntropy::new(options.verbose))
            }
            Statistic::JensenShannon => {
                ScoringStrategy::JensenShannon(JensenShannon::new(options.verbose))
            }
            Statistic::Trident => ScoringStrategy::Trident(Trident::from_options(options)?),
        })
    }

    fn scorer(&self) -> &dyn ColumnScorer {
        match self {
            ScoringStrategy::WeightedEntropy(s) => s,
            ScoringStrategy::JensenShannon(s) => s,
            ScoringStrategy::Trident(s) => s,
        }
    }

    pub fn name(&self) -> &'static str {
        self.scorer().name()
    }

    /// Logs the formula in use and scores every column.
    pub fn compute_scores(&self, msa: &Msa) -> ScoringResult<ColumnScores> {
        let scorer = self.scorer();
        info!("{}", scorer.describe());
        scorer.compute_scores(msa)
    }
}

/// Henikoff weights, dumped at debug level when `verbose` is set.
pub(crate) fn sequence_weights(msa: &Msa, verbose: bool) -> SequenceWeights {
    let weights = SequenceWeights::henikoff(msa);
    if verbose {
        weights.log_weights(msa);
    }
    weights
}

/// `1 / ln(min(|alphabet|, nseq))`, the entropy normalizer shared by the
/// weighted entropy and the Trident `t` term.
pub(crate) fn entropy_lambda(msa: &Msa) -> ScoringResult<f64> {
    let alphabet = msa.alphabet().len();
    let nseq = msa.nseq();
    let outcomes = alphabet.min(nseq);
    if outcomes <= 1 {
        return Err(ScoringError::TooFewOutcomes { alphabet, nseq });
    }
    Ok(1.0 / (outcomes as f64).ln())
}

/// Normalized weighted entropy of every column.
pub(crate) fn weighted_entropy(msa: &Msa, weights: &SequenceWeights) -> ScoringResult<Vec<f64>> {
    let lambda = entropy_lambda(msa)?;
    let profile = ColumnProfile::weighted(msa, weights);
    Ok((0..msa.ncol()).map(|x| profile.entropy(x) * lambda).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_scores_reject_non_finite() {
        assert!(ColumnScores::new(vec![0.0, 1.0]).is_ok());
        assert!(matches!(
            ColumnScores::new(vec![0.5, f64::NAN]),
            Err(ScoringError::NonFinite { column: 1, .. })
        ));
        assert!(matches!(
            ColumnScores::new(vec![f64::INFINITY]),
            Err(ScoringError::NonFinite { column: 0, .. })
        ));
    }

    #[test]
    fn test_entropy_lambda() {
        let msa = Msa::from_rows(&["AC", "AT"]).unwrap();
        assert_eq!(entropy_lambda(&msa).unwrap(), 1.0 / 2f64.ln());

        let single = Msa::from_rows(&["ACDE"]).unwrap();
        assert!(matches!(
            entropy_lambda(&single),
            Err(ScoringError::TooFewOutcomes { alphabet: 4, nseq: 1 })
        ));
    }

    #[test]
    fn test_strategy_dispatch() {
        let msa = Msa::from_rows(&["AAA", "AAA", "AAT"]).unwrap();
        let options = Options::default();

        for (statistic, name) in [
            (Statistic::WeightedEntropy, "wentropy"),
            (Statistic::JensenShannon, "jensen"),
        ] {
            let strategy = ScoringStrategy::from_options(statistic, &options).unwrap();
            assert_eq!(strategy.name(), name);
            assert_eq!(statistic.to_string(), name);
            assert_eq!(strategy.compute_scores(&msa).unwrap().len(), 3);
        }
    }

    #[test]
    fn test_trident_needs_matrix_file() {
        let options = Options {
            matrix_dir: "/nonexistent".into(),
            ..Options::default()
        };
        assert!(matches!(
            ScoringStrategy::from_options(Statistic::Trident, &options),
            Err(ScoringError::Matrix(MatrixError::IoError(_)))
        ));
    }
}
