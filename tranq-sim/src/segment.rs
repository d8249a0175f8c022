use rand::Rng;
use rand::seq::SliceRandom;

use tranq_core::consts::{BASES, MAX_SHORT_SEGMENT_LEN, POLY_A_LABEL, POLY_T_LABEL};
use tranq_core::{Label, LengthRange, PatternSpec, ReferencePool, Segment};

use crate::models::LabeledSequence;

/// `length` independent, uniformly drawn bases from `ACGT`.
pub fn random_bases<R: Rng>(length: usize, rng: &mut R) -> Vec<u8> {
    (0..length).map(|_| random_base(rng)).collect()
}

pub fn random_base<R: Rng>(rng: &mut R) -> u8 {
    BASES[rng.gen_range(0..BASES.len())]
}

/// Draw an insert length from `[min, max)`, or `min` for a degenerate range.
pub fn sample_length<R: Rng>(range: LengthRange, rng: &mut R) -> usize {
    if range.is_degenerate() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

///
/// Sample a cDNA insert of `length` bases.
///
/// With a non-empty pool, one reference is picked uniformly. A reference
/// longer than `length` contributes its prefix or its suffix with equal
/// probability; a shorter one is used whole. An empty pool yields random
/// bases.
///
pub fn draw_transcript<R: Rng>(length: usize, references: &ReferencePool, rng: &mut R) -> Vec<u8> {
    let Some(record) = references.records().choose(rng) else {
        return random_bases(length, rng);
    };

    let seq = &record.sequence;
    if seq.len() > length {
        if rng.gen_bool(0.5) {
            seq[..length].to_vec()
        } else {
            seq[seq.len() - length..].to_vec()
        }
    } else {
        seq.clone()
    }
}

///
/// Generate the bases and labels of one segment.
///
/// # Arguments
/// * `segment` - segment type and its parsed pattern
/// * `length_range` - insert length bounds for `NN` transcript draws
/// * `references` - pool to draw cDNA inserts from (may be empty)
/// * `rng` - randomness source
///
/// Homopolymer segments are always labeled `polyA`/`polyT`, whatever the
/// segment type says.
///
pub fn generate_segment<R: Rng>(
    segment: &Segment,
    length_range: LengthRange,
    references: &ReferencePool,
    rng: &mut R,
) -> LabeledSequence {
    match &segment.pattern {
        PatternSpec::Random(count) => {
            LabeledSequence::uniform(random_bases(*count, rng), &segment.label)
        }
        PatternSpec::Transcript => {
            let length = sample_length(length_range, rng);
            LabeledSequence::uniform(draw_transcript(length, references, rng), &segment.label)
        }
        PatternSpec::ShortTranscript => {
            let length = rng.gen_range(0..MAX_SHORT_SEGMENT_LEN);
            LabeledSequence::uniform(draw_transcript(length, references, rng), &segment.label)
        }
        PatternSpec::Homopolymer(base) => {
            let length = rng.gen_range(0..MAX_SHORT_SEGMENT_LEN);
            let label = if *base == b'A' {
                Label::from(POLY_A_LABEL)
            } else {
                Label::from(POLY_T_LABEL)
            };
            LabeledSequence::uniform(vec![*base; length], &label)
        }
        PatternSpec::Literal(seq) => LabeledSequence::uniform(seq.clone(), &segment.label),
    }
}
