use rand::Rng;
use serde::{Deserialize, Serialize};

use tranq_core::consts::{BASES, POLY_A_LABEL, POLY_T_LABEL, PROTECTED_LABEL};

use crate::consts::DEFAULT_MAX_INSERTIONS;
use crate::models::LabeledSequence;
use crate::segment::random_base;

/// Per-base mutation rates applied to one base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRates {
    pub mismatch: f64,
    pub insertion: f64,
    pub deletion: f64,
}

impl BaseRates {
    pub const ZERO: BaseRates = BaseRates {
        mismatch: 0.0,
        insertion: 0.0,
        deletion: 0.0,
    };

    pub fn uniform(rate: f64) -> Self {
        Self {
            mismatch: rate,
            insertion: rate,
            deletion: rate,
        }
    }

    pub fn total(&self) -> f64 {
        self.mismatch + self.insertion + self.deletion
    }
}

///
/// Sequencing error model.
///
/// Homopolymer-labeled bases use `polyt_error_rate` for all three error
/// types; bases labeled `ACC` are never mutated; everything else uses the
/// generic rates.
///
/// # Example
/// ```toml
/// [errors]
/// mismatch_rate = 0.05
/// insertion_rate = 0.05
/// deletion_rate = 0.06
/// polyt_error_rate = 0.02
/// max_insertions = 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ErrorProfile {
    #[serde(default)]
    pub mismatch_rate: f64,
    #[serde(default)]
    pub insertion_rate: f64,
    #[serde(default)]
    pub deletion_rate: f64,
    #[serde(default)]
    pub polyt_error_rate: f64,
    #[serde(default = "default_max_insertions")]
    pub max_insertions: usize,
}

fn default_max_insertions() -> usize {
    DEFAULT_MAX_INSERTIONS
}

impl Default for ErrorProfile {
    fn default() -> Self {
        Self::error_free()
    }
}

impl ErrorProfile {
    pub fn new(
        mismatch_rate: f64,
        insertion_rate: f64,
        deletion_rate: f64,
        polyt_error_rate: f64,
        max_insertions: usize,
    ) -> Self {
        Self {
            mismatch_rate,
            insertion_rate,
            deletion_rate,
            polyt_error_rate,
            max_insertions,
        }
    }

    /// A profile that leaves every read untouched.
    pub fn error_free() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, DEFAULT_MAX_INSERTIONS)
    }

    pub fn rates_for(&self, label: &str) -> BaseRates {
        match label {
            POLY_T_LABEL | POLY_A_LABEL => BaseRates::uniform(self.polyt_error_rate),
            PROTECTED_LABEL => BaseRates::ZERO,
            _ => BaseRates {
                mismatch: self.mismatch_rate,
                insertion: self.insertion_rate,
                deletion: self.deletion_rate,
            },
        }
    }

    /// Zones past 1.0 can never be reached; worth a warning, not an error.
    pub fn warn_if_saturated(&self) {
        let generic = BaseRates {
            mismatch: self.mismatch_rate,
            insertion: self.insertion_rate,
            deletion: self.deletion_rate,
        };
        if generic.total() > 1.0 {
            log::warn!(
                "Mismatch + insertion + deletion rates sum to {:.3}; later error types will be under-represented",
                generic.total()
            );
        }
        if BaseRates::uniform(self.polyt_error_rate).total() > 1.0 {
            log::warn!(
                "Homopolymer error rate {:.3} saturates all three error types",
                self.polyt_error_rate
            );
        }
    }
}

/// Any base from `ACGT` other than `original`; any of the four if `original`
/// is not one of them.
fn substitute_base<R: Rng>(original: u8, rng: &mut R) -> u8 {
    let candidates = if BASES.contains(&original) { 3 } else { 4 };
    let pick = rng.gen_range(0..candidates);
    BASES
        .iter()
        .copied()
        .filter(|&b| b != original)
        .nth(pick)
        .unwrap_or(original)
}

///
/// Apply label-aware sequencing errors base by base.
///
/// For each base one uniform draw `r` is partitioned into
/// `[mismatch | insertion | deletion | unchanged]`:
/// - mismatch: substitute a different base, keep the label
/// - insertion: keep the base, then append random bases with the same label
///   until `max_insertions` is reached or a fresh draw fails the insertion rate
/// - deletion: drop base and label
///
/// The output length may differ from the input; labels are only ever dropped
/// or duplicated, never rewritten.
///
pub fn introduce_errors<R: Rng>(
    read: &LabeledSequence,
    profile: &ErrorProfile,
    rng: &mut R,
) -> LabeledSequence {
    let mut out = LabeledSequence::with_capacity(read.len());

    for (&base, label) in read.sequence.iter().zip(read.labels.iter()) {
        let rates = profile.rates_for(label);
        let r: f64 = rng.gen();

        if r < rates.mismatch {
            out.push(substitute_base(base, rng), label.clone());
        } else if r < rates.mismatch + rates.insertion {
            out.push(base, label.clone());
            let mut inserted = 0;
            while inserted < profile.max_insertions {
                out.push(random_base(rng), label.clone());
                inserted += 1;
                if rng.gen::<f64>() >= rates.insertion {
                    break;
                }
            }
        } else if r < rates.total() {
            continue;
        } else {
            out.push(base, label.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::*;
    use tranq_core::Label;

    #[fixture]
    fn rng() -> StdRng {
        StdRng::seed_from_u64(17)
    }

    fn labeled(seq: &[u8], label: &str) -> LabeledSequence {
        LabeledSequence::uniform(seq.to_vec(), &Label::from(label))
    }

    #[rstest]
    #[case("cDNA")]
    #[case("polyA")]
    #[case("ACC")]
    fn test_zero_rates_is_identity(mut rng: StdRng, #[case] label: &str) {
        let read = labeled(b"ACGTTTGACCAN", label);
        let out = introduce_errors(&read, &ErrorProfile::error_free(), &mut rng);
        assert_eq!(out, read);
    }

    #[rstest]
    fn test_full_mismatch_changes_every_base(mut rng: StdRng) {
        let read = labeled(b"ACGTACGTACGTACGTAAAA", "cDNA");
        let profile = ErrorProfile::new(1.0, 0.0, 0.0, 0.0, 1);
        let out = introduce_errors(&read, &profile, &mut rng);

        assert_eq!(out.len(), read.len());
        assert_eq!(out.labels, read.labels);
        for (before, after) in read.sequence.iter().zip(out.sequence.iter()) {
            assert_ne!(before, after);
            assert!(BASES.contains(after));
        }
    }

    #[rstest]
    fn test_protected_label_is_never_mutated(mut rng: StdRng) {
        let read = labeled(b"ACGTACGTACGT", "ACC");
        let profile = ErrorProfile::new(0.4, 0.3, 0.3, 1.0, 5);
        for _ in 0..20 {
            assert_eq!(introduce_errors(&read, &profile, &mut rng), read);
        }
    }

    #[rstest]
    fn test_full_deletion_empties_read(mut rng: StdRng) {
        let read = labeled(b"ACGTACGT", "5adapter");
        let profile = ErrorProfile::new(0.0, 0.0, 1.0, 0.0, 1);
        assert!(introduce_errors(&read, &profile, &mut rng).is_empty());
    }

    #[rstest]
    fn test_homopolymer_rate_overrides_generic_rates(mut rng: StdRng) {
        let poly = labeled(b"AAAAAAAAAA", "polyA");
        let profile = ErrorProfile::new(1.0, 0.0, 0.0, 0.0, 1);
        assert_eq!(introduce_errors(&poly, &profile, &mut rng), poly);

        let profile = ErrorProfile::new(0.0, 0.0, 0.0, 1.0, 1);
        let out = introduce_errors(&poly, &profile, &mut rng);
        assert!(out.sequence.iter().all(|&b| b != b'A'));
    }

    #[rstest]
    #[case(0, 8)]
    #[case(1, 16)]
    #[case(3, 32)]
    fn test_insertions_respect_cap(mut rng: StdRng, #[case] cap: usize, #[case] expected: usize) {
        let read = labeled(b"ACGTACGT", "cDNA");
        // insertion rate 1.0 means every follow-up draw succeeds, so the cap binds
        let profile = ErrorProfile::new(0.0, 1.0, 0.0, 0.0, cap);
        let out = introduce_errors(&read, &profile, &mut rng);

        assert_eq!(out.len(), expected);
        assert_eq!(out.labels.len(), expected);
        assert!(out.labels.iter().all(|l| l.as_ref() == "cDNA"));
    }

    #[rstest]
    fn test_insertions_stop_on_failed_draw(mut rng: StdRng) {
        let read = labeled(&[b'C'; 2000], "cDNA");
        // half the bases open an insertion; each inserted base is followed by another with p=0.5
        let profile = ErrorProfile::new(0.0, 0.5, 0.0, 0.0, 50);
        let mut events = 0usize;
        let mut inserted = 0usize;

        for _ in 0..5 {
            let out = introduce_errors(&read, &profile, &mut rng);
            inserted += out.len() - read.len();
            events += read.len();
        }

        // about 0.5 events per base, each adding 1/(1-0.5) = 2 bases on average
        let per_base = inserted as f64 / events as f64;
        assert!((0.8..1.2).contains(&per_base), "inserted {} bases per input base", per_base);
    }

    #[rstest]
    fn test_mixed_labels_stay_aligned(mut rng: StdRng) {
        let mut read = labeled(b"ACGTAC", "5adapter");
        read.append(labeled(b"TTTTTTTT", "polyT"));
        read.append(labeled(b"GGCCAT", "cDNA"));
        let profile = ErrorProfile::new(0.1, 0.1, 0.1, 0.3, 3);

        for _ in 0..50 {
            let out = introduce_errors(&read, &profile, &mut rng);
            assert_eq!(out.sequence.len(), out.labels.len());
        }
    }

    #[rstest]
    fn test_substitute_base_for_unknown_base(mut rng: StdRng) {
        for _ in 0..20 {
            assert!(BASES.contains(&substitute_base(b'N', &mut rng)));
        }
    }
}
