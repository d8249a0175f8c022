use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use tranq_core::Label;
use tranq_core::utils::{reverse_complement, reverse_labels};

use crate::errors::Result;

// ============================================================================
// Labeled Sequence
// ============================================================================

/// A run of bases paired position by position with their segment labels.
///
/// Every constructor and mutator keeps `sequence.len() == labels.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledSequence {
    pub sequence: Vec<u8>,
    pub labels: Vec<Label>,
}

impl LabeledSequence {
    /// Label every base of `sequence` with the same tag.
    pub fn uniform(sequence: Vec<u8>, label: &Label) -> Self {
        let labels = vec![label.clone(); sequence.len()];
        Self { sequence, labels }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sequence: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, base: u8, label: Label) {
        self.sequence.push(base);
        self.labels.push(label);
    }

    /// Concatenate `other` onto the end, bases and labels together.
    pub fn append(&mut self, mut other: LabeledSequence) {
        self.sequence.append(&mut other.sequence);
        self.labels.append(&mut other.labels);
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Reverse bases and labels together.
    pub fn reversed(mut self) -> Self {
        self.sequence.reverse();
        self.labels.reverse();
        self
    }

    /// Reverse complement the bases and reverse the label order.
    pub fn reverse_complemented(&self) -> Result<Self> {
        Ok(Self {
            sequence: reverse_complement(&self.sequence)?,
            labels: reverse_labels(&self.labels),
        })
    }

    ///
    /// Collapse the labels into `(label, run length)` pairs. Adjacent segments
    /// with the same label merge into one run.
    ///
    pub fn label_runs(&self) -> Vec<(Label, usize)> {
        let mut runs: Vec<(Label, usize)> = Vec::new();
        for label in &self.labels {
            match runs.last_mut() {
                Some((last, count)) if last == label => *count += 1,
                _ => runs.push((label.clone(), 1)),
            }
        }
        runs
    }
}

// ============================================================================
// Read Kind
// ============================================================================

/// What was done to the second read of a concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrandFlip {
    None,
    Reverse,
    ReverseComplement,
}

/// The three structural corruption classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorruptionKind {
    Concatenation,
    AdapterRepeat5p,
    AdapterRepeat3p,
}

impl CorruptionKind {
    pub const ALL: [CorruptionKind; 3] = [
        CorruptionKind::Concatenation,
        CorruptionKind::AdapterRepeat5p,
        CorruptionKind::AdapterRepeat3p,
    ];
}

/// How a read in a batch came to be. Kept for traceability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadKind {
    Valid,
    Concatenated(StrandFlip),
    AdapterRepeat5p,
    AdapterRepeat3p,
    /// Augmented copy of another read in the same batch
    ReverseComplement,
}

impl ReadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadKind::Valid => "valid",
            ReadKind::Concatenated(StrandFlip::None) => "concat",
            ReadKind::Concatenated(StrandFlip::Reverse) => "concat_reverse",
            ReadKind::Concatenated(StrandFlip::ReverseComplement) => "concat_revcomp",
            ReadKind::AdapterRepeat5p => "adapter_repeat_5p",
            ReadKind::AdapterRepeat3p => "adapter_repeat_3p",
            ReadKind::ReverseComplement => "reverse_complement",
        }
    }

    pub fn is_corrupted(&self) -> bool {
        matches!(
            self,
            ReadKind::Concatenated(_) | ReadKind::AdapterRepeat5p | ReadKind::AdapterRepeat3p
        )
    }
}

impl Display for ReadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Simulated Read
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRead {
    pub sequence: Vec<u8>,
    pub labels: Vec<Label>,
    pub kind: ReadKind,
}

impl SimulatedRead {
    pub fn new(read: LabeledSequence, kind: ReadKind) -> Self {
        Self {
            sequence: read.sequence,
            labels: read.labels,
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sequence)
    }

    /// The augmented copy: reverse-complemented bases, reversed labels.
    pub fn reverse_complement(&self) -> Result<Self> {
        Ok(Self {
            sequence: reverse_complement(&self.sequence)?,
            labels: reverse_labels(&self.labels),
            kind: ReadKind::ReverseComplement,
        })
    }
}

// ============================================================================
// Batch
// ============================================================================

/// An ordered batch of simulated reads. Order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub reads: Vec<SimulatedRead>,
}

impl Batch {
    pub fn new(reads: Vec<SimulatedRead>) -> Self {
        Self { reads }
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulatedRead> {
        self.reads.iter()
    }

    /// Split into the two order-aligned output collections.
    pub fn into_parts(self) -> (Vec<Vec<u8>>, Vec<Vec<Label>>) {
        self.reads
            .into_iter()
            .map(|read| (read.sequence, read.labels))
            .unzip()
    }
}

// ============================================================================
// Dispatch Mode
// ============================================================================

///
/// How a batch is scheduled when more than one worker is requested.
///
/// `Single` hands the whole batch to the pool as one task, so extra workers
/// do not shorten wall-clock time. `PerRead` spreads reads across the pool
/// with one RNG stream per read.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    #[default]
    Single,
    PerRead,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn labeled(seq: &str, labels: &[&str]) -> LabeledSequence {
        LabeledSequence {
            sequence: seq.as_bytes().to_vec(),
            labels: labels.iter().map(|l| Label::from(*l)).collect(),
        }
    }

    #[rstest]
    fn test_append_keeps_alignment() {
        let mut read = labeled("AC", &["a", "a"]);
        read.append(labeled("GTT", &["b", "b", "b"]));

        assert_eq!(read.sequence, b"ACGTT".to_vec());
        assert_eq!(read.labels.len(), read.sequence.len());
        assert_eq!(read.label_runs(), vec![(Label::from("a"), 2), (Label::from("b"), 3)]);
    }

    #[rstest]
    fn test_reverse_complemented_flips_labels_only_in_order() {
        let read = labeled("AACG", &["x", "x", "y", "z"]);
        let rc = read.reverse_complemented().unwrap();

        assert_eq!(rc.sequence, b"CGTT".to_vec());
        assert_eq!(rc, labeled("CGTT", &["z", "y", "x", "x"]));
    }

    #[rstest]
    fn test_into_parts_is_order_aligned() {
        let batch = Batch::new(vec![
            SimulatedRead::new(labeled("AC", &["a", "a"]), ReadKind::Valid),
            SimulatedRead::new(labeled("G", &["b"]), ReadKind::AdapterRepeat5p),
        ]);
        let (sequences, labels) = batch.into_parts();

        assert_eq!(sequences, vec![b"AC".to_vec(), b"G".to_vec()]);
        assert_eq!(labels[1], vec![Label::from("b")]);
    }

    #[rstest]
    #[case(ReadKind::Valid, false)]
    #[case(ReadKind::Concatenated(StrandFlip::Reverse), true)]
    #[case(ReadKind::AdapterRepeat3p, true)]
    #[case(ReadKind::ReverseComplement, false)]
    fn test_is_corrupted(#[case] kind: ReadKind, #[case] expected: bool) {
        assert_eq!(kind.is_corrupted(), expected);
    }
}
