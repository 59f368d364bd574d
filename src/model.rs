//! Raw sequence records as read from an input file.
//!
//! A [`RawAlignment`] is what the parsers produce: named sequences that are
//! expected, but not yet guaranteed, to share one length. The statistics
//! layer in [`crate::msa`] refuses anything that is not a valid alignment.

/// Gap symbols recognised in alignments.
pub const GAP_SYMBOLS: [u8; 2] = [b'-', b' '];

/// Returns true if `symbol` is a gap.
pub fn is_gap(symbol: u8) -> bool {
    GAP_SYMBOLS.contains(&symbol)
}

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The residues, one byte per alignment column
    data: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into().into_bytes(),
        }
    }

    /// Creates a sequence from raw bytes.
    pub fn from_bytes(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self { id: id.into(), data }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Upper-cases the sequence in place.
    pub fn make_ascii_uppercase(&mut self) {
        self.data.make_ascii_uppercase();
    }
}

/// Sequences read from a file, before column statistics are derived.
#[derive(Debug, Clone, Default)]
pub struct RawAlignment {
    /// All sequences, in file order
    pub sequences: Vec<Sequence>,
    /// Number of records dropped because of the record limit
    pub truncated: usize,
}

impl RawAlignment {
    /// Creates a new alignment from a vector of sequences.
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self {
            sequences,
            truncated: 0,
        }
    }

    /// Length of the first sequence, which every other one must match.
    pub fn alignment_length(&self) -> usize {
        self.sequences.first().map_or(0, Sequence::len)
    }

    /// First sequence whose length differs from [`Self::alignment_length`].
    pub fn length_mismatch(&self) -> Option<&Sequence> {
        let expected = self.alignment_length();
        self.sequences.iter().find(|s| s.len() != expected)
    }

    /// Returns true if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
