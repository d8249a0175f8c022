use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;

use crate::errors::Result;
use crate::models::Batch;

/// One line of the JSON-lines output.
#[derive(Debug, Serialize)]
pub struct ReadRecord<'a> {
    pub id: usize,
    pub kind: &'a str,
    pub sequence: Cow<'a, str>,
    pub labels: Vec<&'a str>,
}

///
/// Write a batch as JSON lines, one object per read. Paths ending in `.gz`
/// are gzip compressed.
///
/// Returns the number of records written.
///
pub fn write_batch(batch: &Batch, path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let written = if path.extension() == Some(OsStr::new("gz")) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        let n = write_records(batch, &mut encoder)?;
        encoder.finish()?.flush()?;
        n
    } else {
        let mut writer = writer;
        let n = write_records(batch, &mut writer)?;
        writer.flush()?;
        n
    };

    log::info!("Wrote {} reads to {}", written, path.display());
    Ok(written)
}

pub fn write_records<W: Write>(batch: &Batch, writer: &mut W) -> Result<usize> {
    for (id, read) in batch.iter().enumerate() {
        let record = ReadRecord {
            id,
            kind: read.kind.as_str(),
            sequence: read.sequence_str(),
            labels: read.labels.iter().map(|l| l.as_ref()).collect(),
        };
        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;
    }
    Ok(batch.len())
}
