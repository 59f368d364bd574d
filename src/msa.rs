//! Column statistics of a multiple sequence alignment.
//!
//! An [`Msa`] is built once from parsed records and derives everything the
//! scoring strategies need:
//! - the alphabet, in first-occurrence order of a column-major scan
//! - gap counts per column
//! - global symbol frequencies
//! - the distinct symbols ("types") of each column
//! - the normalized Shannon entropy of each column
//!
//! Apart from [`Msa::restrict_to_alphabet`], which narrows the per-column
//! type lists, the statistics never change after construction.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::formats::{self, ParseError};
use crate::model::{is_gap, RawAlignment, Sequence};

/// Errors that can occur while deriving alignment statistics.
#[derive(Error, Debug)]
pub enum MsaError {
    #[error("Failed to read alignment: {0}")]
    Parse(#[from] ParseError),

    #[error("Alignment contains no sequences")]
    NoSequences,

    #[error("Alignment has no columns")]
    NoColumns,

    #[error("Sequence '{name}' has length {found}, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Symbol '{0}' is not in the alignment alphabet")]
    SymbolNotInAlphabet(char),

    #[error(
        "Alignment has {0} distinct residue symbol(s); column entropy needs at least 2 to be normalized"
    )]
    DegenerateEntropy(usize),
}

/// Result type for alignment statistics.
pub type MsaResult<T> = Result<T, MsaError>;

/// A validated alignment together with its column statistics.
#[derive(Debug, Clone)]
pub struct Msa {
    names: Vec<String>,
    rows: Vec<Vec<u8>>,
    ncol: usize,
    alphabet: Vec<u8>,
    alphabet_index: HashMap<u8, usize>,
    gap_counts: Vec<usize>,
    frequencies: Vec<f64>,
    type_lists: Vec<Vec<u8>>,
    entropy: Vec<f64>,
}

impl Msa {
    /// Reads a FASTA alignment file and derives its statistics.
    pub fn load<P: AsRef<Path>>(path: P) -> MsaResult<Self> {
        let raw = formats::parse_file(path)?;
        Self::from_raw(raw)
    }

    /// Parses FASTA content and derives its statistics.
    pub fn parse_str(content: &str) -> MsaResult<Self> {
        let raw = formats::parse_content(content)?;
        Self::from_raw(raw)
    }

    /// Builds an alignment from bare rows, named `seq1`, `seq2`, ...
    ///
    /// Rows are upper-cased the same way the FASTA reader does it.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> MsaResult<Self> {
        let sequences = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut sequence = Sequence::new(format!("seq{}", i + 1), row.as_ref());
                sequence.make_ascii_uppercase();
                sequence
            })
            .collect();
        Self::from_raw(RawAlignment::new(sequences))
    }

    /// Validates parsed records and computes all column statistics.
    pub fn from_raw(raw: RawAlignment) -> MsaResult<Self> {
        if raw.is_empty() {
            return Err(MsaError::NoSequences);
        }
        let ncol = raw.alignment_length();
        if let Some(bad) = raw.length_mismatch() {
            return Err(MsaError::LengthMismatch {
                name: bad.id.clone(),
                expected: ncol,
                found: bad.len(),
            });
        }
        if ncol == 0 {
            return Err(MsaError::NoColumns);
        }
        if raw.truncated > 0 {
            warn!(
                "Only the first {} sequences are used, {} more were skipped",
                raw.sequences.len(),
                raw.truncated
            );
        }

        let (names, rows) = raw
            .sequences
            .into_iter()
            .map(|s| {
                let row = s.as_bytes().to_vec();
                (s.id, row)
            })
            .unzip();

        let mut msa = Self {
            names,
            rows,
            ncol,
            alphabet: Vec::new(),
            alphabet_index: HashMap::new(),
            gap_counts: Vec::new(),
            frequencies: Vec::new(),
            type_lists: Vec::new(),
            entropy: Vec::new(),
        };

        msa.define_alphabet();
        msa.count_gaps();
        msa.count_frequencies()?;
        msa.type_lists = (0..ncol).map(|col| msa.distinct_symbols(col)).collect();
        msa.count_entropy()?;

        info!("nb seq = {} -- nb col = {}", msa.nseq(), msa.ncol());
        Ok(msa)
    }

    fn define_alphabet(&mut self) {
        for col in 0..self.ncol {
            for row in &self.rows {
                let symbol = row[col];
                if !self.alphabet_index.contains_key(&symbol) {
                    self.alphabet_index.insert(symbol, self.alphabet.len());
                    self.alphabet.push(symbol);
                }
            }
        }
    }

    fn count_gaps(&mut self) {
        self.gap_counts = (0..self.ncol)
            .map(|col| self.rows.iter().filter(|row| is_gap(row[col])).count())
            .collect();
    }

    /// Global frequencies: occurrences over every position, gaps included,
    /// so that the frequencies of the whole alphabet sum to one.
    fn count_frequencies(&mut self) -> MsaResult<()> {
        let mut counts = vec![0usize; self.alphabet.len()];
        for row in &self.rows {
            for &symbol in row {
                let pos = self
                    .alphabet_index
                    .get(&symbol)
                    .ok_or(MsaError::SymbolNotInAlphabet(symbol as char))?;
                counts[*pos] += 1;
            }
        }

        let total = (self.nseq() * self.ncol) as f64;
        self.frequencies = counts.into_iter().map(|c| c as f64 / total).collect();
        Ok(())
    }

    /// Normalized Shannon entropy of every column.
    ///
    /// Gap symbols are outcomes of the column distribution but do not count
    /// towards the normalizing alphabet size.
    fn count_entropy(&mut self) -> MsaResult<()> {
        let residues = self.residue_alphabet_size();
        if residues < 2 {
            return Err(MsaError::DegenerateEntropy(residues));
        }
        let norm = (residues as f64).ln();
        let nseq = self.nseq() as f64;

        let mut entropy = Vec::with_capacity(self.ncol);
        for col in 0..self.ncol {
            let mut counts = vec![0usize; self.alphabet.len()];
            for row in &self.rows {
                counts[self.alphabet_index[&row[col]]] += 1;
            }

            let mut h = 0.0;
            for count in counts {
                let p = count as f64 / nseq;
                // A single symbol filling the column contributes nothing.
                if p > 0.0 && p < 1.0 {
                    h -= p * p.ln();
                }
            }
            entropy.push(h / norm);
        }
        self.entropy = entropy;
        Ok(())
    }

    fn distinct_symbols(&self, col: usize) -> Vec<u8> {
        let mut types = Vec::new();
        for row in &self.rows {
            if !types.contains(&row[col]) {
                types.push(row[col]);
            }
        }
        types
    }

    /// Number of sequences.
    pub fn nseq(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Sequence identifiers, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Symbols observed in the alignment, gaps included.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Number of distinct non-gap symbols.
    pub fn residue_alphabet_size(&self) -> usize {
        self.alphabet.iter().filter(|&&s| !is_gap(s)).count()
    }

    /// Position of `symbol` in [`Msa::alphabet`].
    pub fn alphabet_position(&self, symbol: u8) -> Option<usize> {
        self.alphabet_index.get(&symbol).copied()
    }

    pub fn gap_count(&self, col: usize) -> usize {
        self.gap_counts[col]
    }

    /// Fraction of gaps in a column.
    pub fn gap_frequency(&self, col: usize) -> f64 {
        self.gap_counts[col] as f64 / self.nseq() as f64
    }

    pub fn num_types(&self, col: usize) -> usize {
        self.type_lists[col].len()
    }

    /// Distinct symbols of a column, in row order of first occurrence.
    pub fn type_list(&self, col: usize) -> &[u8] {
        &self.type_lists[col]
    }

    pub fn symbol_at(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.rows[row]
    }

    pub fn entropy_at(&self, col: usize) -> f64 {
        self.entropy[col]
    }

    /// Global frequency of `symbol` over the whole alignment.
    pub fn frequency_of(&self, symbol: u8) -> MsaResult<f64> {
        self.alphabet_position(symbol)
            .map(|pos| self.frequencies[pos])
            .ok_or(MsaError::SymbolNotInAlphabet(symbol as char))
    }

    /// Global frequencies, parallel to [`Msa::alphabet`].
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// A column read top to bottom.
    pub fn column(&self, col: usize) -> String {
        self.rows.iter().map(|row| row[col] as char).collect()
    }

    /// Keeps only the column types found in `target`. Gaps are always kept.
    ///
    /// Sequences and gap counts are left untouched.
    pub fn restrict_to_alphabet(&mut self, target: &[u8]) {
        for col in 0..self.ncol {
            let types = self
                .distinct_symbols(col)
                .into_iter()
                .filter(|&s| is_gap(s) || target.contains(&s))
                .collect();
            self.type_lists[col] = types;
        }
    }

    /// True if every non-gap symbol of the alignment is in `candidate`.
    pub fn is_subset_of(&self, candidate: &[u8]) -> bool {
        self.alphabet
            .iter()
            .all(|&s| is_gap(s) || candidate.contains(&s))
    }

    /// Dumps the alignment statistics at debug level.
    pub fn log_statistics(&self) {
        debug!("Alphabet: {}", join(self.alphabet.iter().map(|&s| s as char)));
        debug!("Multiple alignment:");
        for (name, row) in self.names.iter().zip(&self.rows) {
            debug!("{:>12} {}", name, String::from_utf8_lossy(row));
        }
        debug!("Global frequencies: {}", join(&self.frequencies));
        debug!("Gap counts: {}", join(&self.gap_counts));
        debug!("Entropy: {}", join(&self.entropy));
        debug!("Types: {}", join(self.type_lists.iter().map(Vec::len)));
    }
}

fn join<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
