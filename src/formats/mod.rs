//! Alignment file reading.
//!
//! Only FASTA-like input is supported. The content is sniffed before
//! parsing so that an obviously foreign file (PHYLIP, NEXUS, Clustal...)
//! gets a clear message instead of a "sequence without header" error.

pub mod fasta;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::model::RawAlignment;

/// Errors that can occur while reading an alignment file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Not a FASTA alignment (first line: '{0}').\n\
             Hint: records must start with a '>' header line")]
    UnknownFormat(String),

    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Returns the first non-blank line if it is not a FASTA header.
pub fn detect_foreign_content(content: &str) -> Option<&str> {
    let first = fasta::first_content_line(content)?;
    if first.starts_with('>') {
        None
    } else {
        Some(first)
    }
}

/// Parses an alignment from in-memory content.
pub fn parse_content(content: &str) -> ParseResult<RawAlignment> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }
    if let Some(first) = detect_foreign_content(content) {
        return Err(ParseError::UnknownFormat(first.chars().take(40).collect()));
    }
    Ok(fasta::parse_fasta_str(content)?)
}

/// Parses an alignment file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<RawAlignment> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    if file_size == 0 {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    parse_content(&content)
}
