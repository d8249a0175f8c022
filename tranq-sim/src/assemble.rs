use rand::Rng;

use tranq_core::{ArchitectureSpec, LengthRange, ReferencePool};

use crate::models::LabeledSequence;
use crate::segment::generate_segment;

///
/// Build one structurally valid read: every architecture segment, in order.
///
/// Segment boundaries are only implicit in the labels.
///
pub fn generate_valid_read<R: Rng>(
    architecture: &ArchitectureSpec,
    length_range: LengthRange,
    references: &ReferencePool,
    rng: &mut R,
) -> LabeledSequence {
    let mut read = LabeledSequence::default();
    for segment in architecture {
        read.append(generate_segment(segment, length_range, references, rng));
    }
    read
}
