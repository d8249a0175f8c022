use crate::errors::{Result, TranqError};
use crate::models::{Label, PatternSpec};

/// One entry of a read architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub label: Label,
    pub pattern: PatternSpec,
}

impl Segment {
    pub fn new(label: &str, pattern: PatternSpec) -> Self {
        Self {
            label: Label::from(label),
            pattern,
        }
    }
}

///
/// The ordered layout of one valid read, e.g.
/// `5adapter:ACGT, cDNA:NN, polyA:A, 3adapter:TTTT`.
///
/// Built once from two order-aligned lists (segment types and pattern specs)
/// and never mutated afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureSpec {
    segments: Vec<Segment>,
}

impl ArchitectureSpec {
    ///
    /// Create a new [ArchitectureSpec] from segment types and their patterns.
    ///
    /// Unrecognised patterns fall back to literal sequences.
    ///
    pub fn new<S: AsRef<str>, P: AsRef<str>>(order: &[S], patterns: &[P]) -> Result<Self> {
        Self::build(order, patterns, false)
    }

    /// Like [ArchitectureSpec::new], but rejects suspicious literal patterns.
    pub fn new_strict<S: AsRef<str>, P: AsRef<str>>(order: &[S], patterns: &[P]) -> Result<Self> {
        Self::build(order, patterns, true)
    }

    pub fn build<S: AsRef<str>, P: AsRef<str>>(
        order: &[S],
        patterns: &[P],
        strict: bool,
    ) -> Result<Self> {
        if order.len() != patterns.len() {
            return Err(TranqError::ArchitectureMismatch {
                order: order.len(),
                patterns: patterns.len(),
            });
        }
        if order.is_empty() {
            return Err(TranqError::EmptyArchitecture);
        }

        let segments = order
            .iter()
            .zip(patterns.iter())
            .map(|(seg, pat)| {
                let pattern = PatternSpec::parse(seg.as_ref(), pat.as_ref(), strict)?;
                Ok(Segment::new(seg.as_ref(), pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// The adapter repeated by 5' corruption: the second segment.
    pub fn five_prime_adapter(&self) -> Option<&Segment> {
        self.segments.get(1)
    }

    /// The adapter repeated by 3' corruption: the second-to-last segment.
    pub fn three_prime_adapter(&self) -> Option<&Segment> {
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|idx| self.segments.get(idx))
    }
}

impl<'a> IntoIterator for &'a ArchitectureSpec {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
