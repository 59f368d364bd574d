//! Substitution matrix files.
//!
//! Matrices are read in the NCBI text layout used by BLOSUM/PAM files:
//!
//! ```text
//! # comment
//!    A  R  N
//! A  4 -1 -2
//! R -1  5  0
//! N -2  0  6
//! ```
//!
//! Row labels are optional but, when present, must follow the header
//! order. Scores are normalized to `[0, 1]` with
//! `(s - min) / (max - min)` over the whole table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

/// Errors that can occur while reading a substitution matrix.
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Failed to read substitution matrix: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Substitution matrix has no header line")]
    MissingHeader,

    #[error("Invalid header token '{0}': expected a single symbol")]
    InvalidHeader(String),

    #[error("Substitution matrix has {0} symbol(s), at least 2 are needed")]
    TooFewSymbols(usize),

    #[error("Symbol '{0}' appears twice in the header")]
    DuplicateSymbol(char),

    #[error("Line {line}: row label '{found}' does not match header symbol '{expected}'")]
    RowLabelMismatch {
        line: usize,
        expected: char,
        found: String,
    },

    #[error("Line {line}: invalid score '{token}'")]
    InvalidScore { line: usize, token: String },

    #[error("Line {line}: expected {expected} scores, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("All substitution scores are equal, the matrix cannot be normalized")]
    Flat,
}

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// A square symbol-by-symbol similarity table.
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    alphabet: Vec<u8>,
    index: HashMap<u8, usize>,
    normalized: Array2<f64>,
}

impl SubstitutionMatrix {
    /// Reads a matrix file.
    pub fn load<P: AsRef<Path>>(path: P) -> MatrixResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parses a matrix from its text form.
    pub fn parse_str(content: &str) -> MatrixResult<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines.next().ok_or(MatrixError::MissingHeader)?;
        let alphabet = parse_header(header)?;
        let size = alphabet.len();
        if size < 2 {
            return Err(MatrixError::TooFewSymbols(size));
        }

        let mut index = HashMap::with_capacity(size);
        for (i, &symbol) in alphabet.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(MatrixError::DuplicateSymbol(symbol as char));
            }
        }

        let mut raw = Array2::<f64>::zeros((size, size));
        let mut row = 0;
        for (line_number, line) in lines {
            if row == size {
                return Err(MatrixError::RowCount {
                    expected: size,
                    found: row + 1,
                });
            }

            let mut tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens[0].parse::<f64>().is_err() {
                let label = tokens.remove(0);
                let expected = alphabet[row];
                if !label.eq_ignore_ascii_case(&(expected as char).to_string()) {
                    return Err(MatrixError::RowLabelMismatch {
                        line: line_number,
                        expected: expected as char,
                        found: label.to_string(),
                    });
                }
            }

            if tokens.len() != size {
                return Err(MatrixError::RowLength {
                    line: line_number,
                    expected: size,
                    found: tokens.len(),
                });
            }

            for (col, token) in tokens.iter().enumerate() {
                raw[[row, col]] = token.parse().map_err(|_| MatrixError::InvalidScore {
                    line: line_number,
                    token: token.to_string(),
                })?;
            }
            row += 1;
        }

        if row != size {
            return Err(MatrixError::RowCount {
                expected: size,
                found: row,
            });
        }

        let raw_min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let raw_max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if raw_max <= raw_min {
            return Err(MatrixError::Flat);
        }
        let normalized = raw.mapv(|s| (s - raw_min) / (raw_max - raw_min));

        Ok(Self {
            alphabet,
            index,
            normalized,
        })
    }

    /// Symbols of the matrix, in header order.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    /// Normalized similarity of `a` and `b`, if both are in the matrix.
    pub fn score(&self, a: u8, b: u8) -> Option<f64> {
        let i = *self.index.get(&a)?;
        let j = *self.index.get(&b)?;
        Some(self.normalized[[i, j]])
    }

    /// Normalized scores of every matrix symbol against `symbol`, in
    /// alphabet order.
    pub fn score_vector(&self, symbol: u8) -> Option<ArrayView1<'_, f64>> {
        let j = *self.index.get(&symbol)?;
        Some(self.normalized.column(j))
    }

    /// Lowest normalized score.
    pub fn min(&self) -> f64 {
        self.normalized.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Highest normalized score.
    pub fn max(&self) -> f64 {
        self.normalized.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

fn parse_header(header: &str) -> MatrixResult<Vec<u8>> {
    header
        .split_whitespace()
        .map(|token| match token.as_bytes() {
            [symbol] => Ok(symbol.to_ascii_uppercase()),
            _ => Err(MatrixError::InvalidHeader(token.to_string())),
        })
        .collect()
}
