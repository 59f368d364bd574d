//! # conscore - Alignment Conservation Scores
//!
//! Computes one conservation score per column of a multiple sequence
//! alignment.
//!
//! ## Architecture
//!
//! - `model`: raw sequence records
//! - `formats`: FASTA reading
//! - `msa`: alignment validation and column statistics
//! - `weighting`: Henikoff sequence weights
//! - `matrix`: substitution matrix files
//! - `scoring`: weighted entropy, Jensen-Shannon and Trident strategies
//! - `config`: run options
//! - `output`: score file writer
//!
//! ## Example
//!
//! ```
//! use conscore::msa::Msa;
//! use conscore::scoring::{ColumnScorer, WeightedEntropy};
//!
//! let msa = Msa::from_rows(&["AAA", "AAA", "AAT"]).unwrap();
//! let scores = WeightedEntropy::default().compute_scores(&msa).unwrap();
//! assert_eq!(scores.as_slice()[0], 1.0);
//! assert!(scores.as_slice()[2] < 1.0);
//! ```

pub mod config;
pub mod formats;
pub mod matrix;
pub mod model;
pub mod msa;
pub mod output;
pub mod scoring;
pub mod weighting;
