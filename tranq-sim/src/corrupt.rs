use rand::Rng;

use tranq_core::{ArchitectureSpec, LengthRange, ReferencePool, Segment};

use crate::assemble::generate_valid_read;
use crate::consts::{ADAPTER_REPEATS, CONCAT_KEEP_PROB, CONCAT_REVERSE_PROB};
use crate::errors::{Result, SimulationError};
use crate::models::{CorruptionKind, LabeledSequence, ReadKind, StrandFlip};
use crate::segment::generate_segment;

impl StrandFlip {
    /// Keep with p=0.5, reverse with p=0.25, reverse complement with p=0.25.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let r: f64 = rng.gen();
        if r < CONCAT_KEEP_PROB {
            StrandFlip::None
        } else if r < CONCAT_KEEP_PROB + CONCAT_REVERSE_PROB {
            StrandFlip::Reverse
        } else {
            StrandFlip::ReverseComplement
        }
    }

    pub fn apply(&self, read: LabeledSequence) -> Result<LabeledSequence> {
        match self {
            StrandFlip::None => Ok(read),
            StrandFlip::Reverse => Ok(read.reversed()),
            StrandFlip::ReverseComplement => Ok(read.reverse_complemented()?),
        }
    }
}

impl CorruptionKind {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

///
/// Build one structurally invalid read.
///
/// The corruption class is drawn uniformly:
/// - concatenation of two valid reads, the second possibly reversed or
///   reverse complemented
/// - the second segment tripled and prefixed onto a valid read
/// - the second-to-last segment tripled and prefixed onto a valid read
///
/// Note that the 3' variant also *prefixes* its repeat.
///
/// # Errors
/// [SimulationError::TooFewSegments] when the architecture has fewer than two
/// segments; reverse complement failures on non-nucleotide literals.
///
pub fn generate_invalid_read<R: Rng>(
    architecture: &ArchitectureSpec,
    length_range: LengthRange,
    references: &ReferencePool,
    rng: &mut R,
) -> Result<(LabeledSequence, ReadKind)> {
    match CorruptionKind::sample(rng) {
        CorruptionKind::Concatenation => {
            let mut first = generate_valid_read(architecture, length_range, references, rng);
            let second = generate_valid_read(architecture, length_range, references, rng);

            let flip = StrandFlip::sample(rng);
            first.append(flip.apply(second)?);

            Ok((first, ReadKind::Concatenated(flip)))
        }
        CorruptionKind::AdapterRepeat5p => {
            let adapter = architecture
                .five_prime_adapter()
                .ok_or(SimulationError::TooFewSegments(architecture.len()))?;
            let read = repeat_adapter(adapter, architecture, length_range, references, rng);
            Ok((read, ReadKind::AdapterRepeat5p))
        }
        CorruptionKind::AdapterRepeat3p => {
            let adapter = architecture
                .three_prime_adapter()
                .ok_or(SimulationError::TooFewSegments(architecture.len()))?;
            let read = repeat_adapter(adapter, architecture, length_range, references, rng);
            Ok((read, ReadKind::AdapterRepeat3p))
        }
    }
}

///
/// Generate `adapter` once, repeat it [ADAPTER_REPEATS] times, and prefix the
/// repeat onto a freshly assembled valid read.
///
/// The whole repeat carries the adapter fragment's first label. An empty
/// adapter fragment contributes no prefix.
///
fn repeat_adapter<R: Rng>(
    adapter: &Segment,
    architecture: &ArchitectureSpec,
    length_range: LengthRange,
    references: &ReferencePool,
    rng: &mut R,
) -> LabeledSequence {
    let fragment = generate_segment(adapter, length_range, references, rng);

    let mut read = match fragment.labels.first() {
        Some(label) => LabeledSequence::uniform(fragment.sequence.repeat(ADAPTER_REPEATS), label),
        None => LabeledSequence::default(),
    };
    read.append(generate_valid_read(architecture, length_range, references, rng));
    read
}
