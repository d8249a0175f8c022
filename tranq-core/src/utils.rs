use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{Result, TranqError};
use crate::models::Label;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Complement a single base. `N` maps to itself; lowercase input keeps its case.
pub fn complement(base: u8) -> Result<u8> {
    match base {
        b'A' => Ok(b'T'),
        b'T' => Ok(b'A'),
        b'C' => Ok(b'G'),
        b'G' => Ok(b'C'),
        b'N' => Ok(b'N'),
        b'a' => Ok(b't'),
        b't' => Ok(b'a'),
        b'c' => Ok(b'g'),
        b'g' => Ok(b'c'),
        b'n' => Ok(b'n'),
        other => Err(TranqError::InvalidBase(other as char)),
    }
}

///
/// Reverse complement a sequence.
///
/// Fails on the first base outside `ACGTN` (either case); nothing is returned
/// for a partially complemented sequence.
///
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Labels are structural tags, so flipping strand only flips their order.
pub fn reverse_labels(labels: &[Label]) -> Vec<Label> {
    labels.iter().rev().cloned().collect()
}
