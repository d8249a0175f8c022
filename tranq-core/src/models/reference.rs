use std::io::Read;
use std::path::Path;

use seq_io::fasta::{self, Reader, Record};

use crate::errors::{Result, TranqError};
use crate::utils::get_dynamic_reader;

/// A single reference transcript available for cDNA sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub name: String,
    pub sequence: Vec<u8>,
}

impl ReferenceRecord {
    pub fn new(name: String, sequence: Vec<u8>) -> Self {
        Self { name, sequence }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

///
/// The read-only collection of reference sequences shared by every
/// generation call. An empty pool is valid: transcript draws then fall back to
/// random bases.
///
#[derive(Debug, Clone, Default)]
pub struct ReferencePool {
    records: Vec<ReferenceRecord>,
}

impl ReferencePool {
    pub fn new(records: Vec<ReferenceRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    ///
    /// Load a reference pool from a FASTA file. Files ending in `.gz` are
    /// decompressed on the fly.
    ///
    /// # Arguments
    ///
    /// - path: path to the FASTA file
    ///
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let pool = Self::from_reader(reader).map_err(|e| match e {
            TranqError::ReferenceParseError { reason, .. } => TranqError::ReferenceParseError {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        log::info!(
            "Loaded {} reference sequences ({} bases) from {}",
            pool.len(),
            pool.total_bases(),
            path.display()
        );

        Ok(pool)
    }

    ///
    /// Parse FASTA records from any reader. Names are the first word of the
    /// header; sequences are upper-cased with line breaks removed.
    ///
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut fasta_reader = Reader::new(reader);
        let mut records = Vec::new();

        while let Some(record) = fasta_reader.next() {
            let record = record.map_err(|e| match e {
                fasta::Error::Io(io_err) => TranqError::Io(io_err),
                other => TranqError::ReferenceParseError {
                    path: String::from("<reader>"),
                    reason: other.to_string(),
                },
            })?;
            let name = record.id().map_err(|e| TranqError::ReferenceParseError {
                path: String::from("<reader>"),
                reason: format!("record #{} has a non UTF-8 ID: {}", records.len() + 1, e),
            })?;
            let sequence = record.full_seq().to_ascii_uppercase();
            records.push(ReferenceRecord::new(name.to_string(), sequence));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_bases(&self) -> usize {
        self.records.iter().map(|r| r.len()).sum()
    }
}

impl From<Vec<ReferenceRecord>> for ReferencePool {
    fn from(records: Vec<ReferenceRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    fn test_parse_multiline_records() {
        let fasta = ">tx1 some description\nACGT\nacgt\n\n>tx2\nTTTT\n";
        let pool = ReferencePool::from_reader(Cursor::new(fasta)).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.records()[0].name, "tx1");
        assert_eq!(pool.records()[0].sequence, b"ACGTACGT".to_vec());
        assert_eq!(pool.records()[1].sequence, b"TTTT".to_vec());
        assert_eq!(pool.total_bases(), 12);
    }

    #[rstest]
    fn test_parse_empty_input() {
        let pool = ReferencePool::from_reader(Cursor::new("")).unwrap();
        assert!(pool.is_empty());
    }

    #[rstest]
    fn test_parse_crlf_records() {
        let fasta = ">tx1\r\nACG\r\nTA\r\n>tx2 desc\r\nGG\r\n";
        let pool = ReferencePool::from_reader(Cursor::new(fasta)).unwrap();

        assert_eq!(pool.records()[0], ReferenceRecord::new("tx1".to_string(), b"ACGTA".to_vec()));
        assert_eq!(pool.records()[1].name, "tx2");
        assert_eq!(pool.records()[1].sequence, b"GG".to_vec());
    }

    #[rstest]
    fn test_parse_rejects_headerless_sequence() {
        let result = ReferencePool::from_reader(Cursor::new("ACGT\n>tx1\nAC\n"));
        assert!(matches!(result, Err(TranqError::ReferenceParseError { .. })));
    }
}
