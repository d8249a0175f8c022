use crate::errors::{Result, TranqError};

///
/// Bounds for variable-length cDNA inserts.
///
/// Lengths are drawn from the half-open interval `[min, max)`. A degenerate
/// range where `min == max` always yields `min`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(TranqError::InvalidLengthRange(min, max));
        }
        Ok(Self { min, max })
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl TryFrom<(usize, usize)> for LengthRange {
    type Error = TranqError;

    fn try_from(value: (usize, usize)) -> Result<Self> {
        LengthRange::new(value.0, value.1)
    }
}
