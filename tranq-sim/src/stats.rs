use crate::models::{Batch, ReadKind, StrandFlip};

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub total_reads: usize,
    pub valid: usize,
    pub concatenated: usize,
    pub concatenated_reverse: usize,
    pub concatenated_revcomp: usize,
    pub adapter_repeat_5p: usize,
    pub adapter_repeat_3p: usize,
    pub reverse_complement: usize,
    pub total_bases: u64,
    pub mean_length: f64,
    pub min_length: usize,
    pub max_length: usize,
}

impl BatchStats {
    pub fn from_batch(batch: &Batch) -> Self {
        if batch.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total_reads: batch.len(),
            min_length: usize::MAX,
            ..Default::default()
        };

        for read in batch.iter() {
            match read.kind {
                ReadKind::Valid => stats.valid += 1,
                ReadKind::Concatenated(StrandFlip::None) => stats.concatenated += 1,
                ReadKind::Concatenated(StrandFlip::Reverse) => stats.concatenated_reverse += 1,
                ReadKind::Concatenated(StrandFlip::ReverseComplement) => {
                    stats.concatenated_revcomp += 1
                }
                ReadKind::AdapterRepeat5p => stats.adapter_repeat_5p += 1,
                ReadKind::AdapterRepeat3p => stats.adapter_repeat_3p += 1,
                ReadKind::ReverseComplement => stats.reverse_complement += 1,
            }
            stats.total_bases += read.len() as u64;
            stats.min_length = stats.min_length.min(read.len());
            stats.max_length = stats.max_length.max(read.len());
        }
        stats.mean_length = stats.total_bases as f64 / stats.total_reads as f64;

        stats
    }

    pub fn corrupted(&self) -> usize {
        self.concatenated
            + self.concatenated_reverse
            + self.concatenated_revcomp
            + self.adapter_repeat_5p
            + self.adapter_repeat_3p
    }

    pub fn log_summary(&self) {
        log::info!("=== Batch Statistics ===");
        log::info!("Total reads: {}", self.total_reads);
        log::info!("  Valid: {}", self.valid);
        log::info!("  Corrupted: {}", self.corrupted());
        log::info!(
            "    concat: {} / reversed: {} / revcomp: {}",
            self.concatenated,
            self.concatenated_reverse,
            self.concatenated_revcomp
        );
        log::info!("    5' adapter repeat: {}", self.adapter_repeat_5p);
        log::info!("    3' adapter repeat: {}", self.adapter_repeat_3p);
        log::info!("  Reverse-complement copies: {}", self.reverse_complement);
        log::info!(
            "Read length: mean {:.1}, min {}, max {}",
            self.mean_length,
            self.min_length,
            self.max_length
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tranq_core::Label;

    use crate::models::{LabeledSequence, SimulatedRead};

    fn read(len: usize, kind: ReadKind) -> SimulatedRead {
        SimulatedRead::new(LabeledSequence::uniform(vec![b'A'; len], &Label::from("x")), kind)
    }

    #[rstest]
    fn test_empty_batch() {
        assert_eq!(BatchStats::from_batch(&Batch::default()), BatchStats::default());
    }

    #[rstest]
    fn test_counts_and_lengths() {
        let batch = Batch::new(vec![
            read(10, ReadKind::Valid),
            read(30, ReadKind::AdapterRepeat5p),
            read(20, ReadKind::Concatenated(StrandFlip::Reverse)),
            read(0, ReadKind::ReverseComplement),
        ]);
        let stats = BatchStats::from_batch(&batch);

        assert_eq!(stats.total_reads, 4);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.corrupted(), 2);
        assert_eq!(stats.reverse_complement, 1);
        assert_eq!(stats.min_length, 0);
        assert_eq!(stats.max_length, 30);
        assert_eq!(stats.mean_length, 15.0);
    }
}
