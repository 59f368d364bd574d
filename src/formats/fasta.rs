//! FASTA file parser.
//!
//! This module handles parsing FASTA content. It supports both single-line
//! and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGT-CGT ACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Residues are upper-cased on load. Body lines lose only their line
//! terminator: a space is a gap symbol, just like `-`, wherever it sits on
//! the line. Empty lines are skipped, and so are whitespace-only lines
//! before the first header.

use thiserror::Error;

use crate::model::{RawAlignment, Sequence};

/// Maximum number of records kept from one file. Later records are skipped.
pub const MAX_RECORDS: usize = 500;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Content lines without their terminators, numbered from 1.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
}

/// First line that carries something other than whitespace.
///
/// This is where the first header must be; [`parse_fasta_str`] skips the
/// same leading lines.
pub fn first_content_line(content: &str) -> Option<&str> {
    numbered_lines(content)
        .map(|(_, line)| line)
        .find(|line| !line.trim().is_empty())
}

/// Parses FASTA content from a string.
///
/// At most [`MAX_RECORDS`] records are kept; the number of skipped records
/// is stored in [`RawAlignment::truncated`].
pub fn parse_fasta_str(content: &str) -> FastaResult<RawAlignment> {
    let mut sequences = Vec::new();
    let mut current_id: Option<&str> = None;
    let mut current_seq: Vec<u8> = Vec::new();
    let mut skipping = false;
    let mut truncated = 0;

    for (line_number, line) in numbered_lines(content) {
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            // Save previous sequence if exists
            if let Some(id) = current_id.take() {
                push_record(&mut sequences, id, std::mem::take(&mut current_seq));
            }

            if sequences.len() >= MAX_RECORDS {
                skipping = true;
                truncated += 1;
                continue;
            }

            // Take everything before first space as ID
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id);
        } else {
            if skipping {
                continue;
            }
            if current_id.is_none() {
                if sequences.is_empty() && line.trim().is_empty() {
                    continue;
                }
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.bytes().filter(|&b| b != b'\t'));
        }
    }

    // Don't forget the last sequence
    if let Some(id) = current_id {
        push_record(&mut sequences, id, current_seq);
    }

    let mut alignment = RawAlignment::new(sequences);
    alignment.truncated = truncated;
    Ok(alignment)
}

fn push_record(sequences: &mut Vec<Sequence>, id: &str, data: Vec<u8>) {
    let mut sequence = Sequence::from_bytes(id, data);
    sequence.make_ascii_uppercase();
    sequences.push(sequence);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(alignment: &RawAlignment) -> Vec<&[u8]> {
        alignment.sequences.iter().map(Sequence::as_bytes).collect()
    }

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACGT\n>seq2\nTGCA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequences.len(), 2);
        assert_eq!(alignment.sequences[0].id, "seq1");
        assert_eq!(alignment.sequences[1].id, "seq2");
        assert_eq!(bodies(&alignment), vec![&b"ACGT"[..], &b"TGCA"[..]]);
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACGT\nTGCA\nAAAA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequences.len(), 1);
        assert_eq!(alignment.sequences[0].as_bytes(), b"ACGTTGCAAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let content = ">seq1 This is a description\nACGT\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequences[0].id, "seq1");
    }

    #[test]
    fn test_parse_with_empty_lines_and_crlf() {
        let content = ">seq1\r\nACGT\r\n\r\n>seq2\n\nTGCA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(bodies(&alignment), vec![&b"ACGT"[..], &b"TGCA"[..]]);
    }

    #[test]
    fn test_uppercase_on_load() {
        let content = ">seq1\nac-t\n";
        let alignment = parse_fasta_str(content).unwrap();
        assert_eq!(alignment.sequences[0].as_bytes(), b"AC-T");
    }

    #[test]
    fn test_spaces_are_kept() {
        let content = ">seq1\nAC T\n>seq2\nAC \n>seq3\n   \n>seq4\n A\r\nC \r\n";
        let alignment = parse_fasta_str(content).unwrap();
        assert_eq!(
            bodies(&alignment),
            vec![&b"AC T"[..], &b"AC "[..], &b"   "[..], &b" AC "[..]]
        );
        assert!(alignment.length_mismatch().is_some());
    }

    #[test]
    fn test_tabs_are_dropped() {
        let alignment = parse_fasta_str(">seq1\nA\tC\n").unwrap();
        assert_eq!(alignment.sequences[0].as_bytes(), b"AC");
    }

    #[test]
    fn test_blank_lines_before_first_header() {
        let content = "\n  \n\t\n>seq1\nACGT\n";
        let alignment = parse_fasta_str(content).unwrap();
        assert_eq!(bodies(&alignment), vec![&b"ACGT"[..]]);
        assert_eq!(first_content_line(content), Some(">seq1"));
    }

    #[test]
    fn test_indented_header_is_not_a_header() {
        let content = "  >seq1\nACGT\n";
        assert_eq!(first_content_line(content), Some("  >seq1"));
        assert!(matches!(
            parse_fasta_str(content),
            Err(FastaError::SequenceWithoutHeader(1))
        ));
    }

    #[test]
    fn test_empty_content() {
        let alignment = parse_fasta_str("").unwrap();
        assert!(alignment.is_empty());
        assert_eq!(first_content_line(" \n\n"), None);
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let content = ">\nACGT\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_header_without_body_is_kept_empty() {
        let content = ">seq1\n>seq2\nACGT\n";
        let alignment = parse_fasta_str(content).unwrap();
        assert_eq!(alignment.sequences.len(), 2);
        assert!(alignment.sequences[0].is_empty());
        assert_eq!(alignment.length_mismatch().unwrap().id, "seq2");
    }

    #[test]
    fn test_record_limit() {
        let mut content = String::new();
        for i in 0..(MAX_RECORDS + 7) {
            content.push_str(&format!(">s{}\nAC\nGT\n", i));
        }
        let alignment = parse_fasta_str(&content).unwrap();

        assert_eq!(alignment.sequences.len(), MAX_RECORDS);
        assert_eq!(alignment.truncated, 7);
        let last = &alignment.sequences[MAX_RECORDS - 1];
        assert_eq!(last.id, format!("s{}", MAX_RECORDS - 1));
        assert_eq!(last.as_bytes(), b"ACGT");
    }
}
