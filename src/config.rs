//! Run options.
//!
//! The command line is parsed once into an [`Options`] value which is then
//! handed by reference to whatever needs it.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default name of the substitution matrix file inside the matrix directory.
pub const DEFAULT_MATRIX_FILE: &str = "blosum62.mat";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Trident exponent '{name}' must be a finite, non-negative number (got {value})")]
    InvalidExponent { name: char, value: f64 },
}

/// Exponents of the three Trident terms: `(1-t)^a * (1-r)^b * (1-g)^c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TridentExponents {
    /// Weight of the entropy term
    pub a: f64,
    /// Weight of the residue similarity term
    pub b: f64,
    /// Weight of the gap term
    pub c: f64,
}

impl TridentExponents {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        for (name, value) in [('a', a), ('b', b), ('c', c)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidExponent { name, value });
            }
        }
        Ok(Self { a, b, c })
    }
}

impl Default for TridentExponents {
    /// Values recommended by Valdar (2002).
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.5,
            c: 3.0,
        }
    }
}

/// Everything a scoring run needs to know besides the alignment itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Dump alignment statistics and sequence weights
    pub verbose: bool,
    /// Where the scores go; "-" is standard output
    pub output_path: PathBuf,
    /// Directory holding the substitution matrix
    pub matrix_dir: PathBuf,
    /// Substitution matrix file name inside `matrix_dir`
    pub matrix_file: String,
    pub exponents: TridentExponents,
}

impl Options {
    /// Full path of the substitution matrix file.
    pub fn matrix_path(&self) -> PathBuf {
        self.matrix_dir.join(&self.matrix_file)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            output_path: PathBuf::from("output.stat"),
            matrix_dir: PathBuf::from("data"),
            matrix_file: DEFAULT_MATRIX_FILE.to_string(),
            exponents: TridentExponents::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_path() {
        let options = Options {
            matrix_dir: PathBuf::from("/opt/matrices"),
            ..Options::default()
        };
        assert_eq!(options.matrix_path(), PathBuf::from("/opt/matrices/blosum62.mat"));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(
            TridentExponents::new(1.0, 0.5, 3.0).unwrap(),
            TridentExponents::default()
        );
        assert_eq!(
            TridentExponents::new(1.0, -0.5, 3.0),
            Err(ConfigError::InvalidExponent { name: 'b', value: -0.5 })
        );
        assert!(TridentExponents::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(TridentExponents::new(0.0, 0.0, f64::INFINITY).is_err());
    }
}
