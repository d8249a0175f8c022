use std::fmt::{self, Display};

use crate::consts::{CDNA_LABEL, SHORT_TRANSCRIPT_PATTERN, TRANSCRIPT_PATTERN};
use crate::errors::{Result, TranqError};

///
/// How the bases of one segment are produced.
///
/// `NN` and `RN` are transcript draws only for `cDNA` segments; for any other
/// segment type they fall through to [PatternSpec::Literal], as does every
/// string that matches no directive.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSpec {
    /// `N<k>`: exactly `k` uniform random bases
    Random(usize),
    /// `NN`: transcript draw with length from the configured range
    Transcript,
    /// `RN`: transcript draw with a short length
    ShortTranscript,
    /// `A` or `T`: a homopolymer run of random length
    Homopolymer(u8),
    /// anything else, emitted verbatim
    Literal(Vec<u8>),
}

impl PatternSpec {
    ///
    /// Parse a pattern spec for the given segment type.
    ///
    /// Unknown patterns are kept as upper-cased literals. With `strict` set, a
    /// literal that contains characters outside `ACGTN` (either case), or a
    /// transcript directive on a non-cDNA segment, is rejected instead.
    ///
    pub fn parse(segment_type: &str, pattern: &str, strict: bool) -> Result<Self> {
        let invalid = |reason: String| TranqError::InvalidPattern {
            segment: segment_type.to_string(),
            pattern: pattern.to_string(),
            reason,
        };

        let bytes = pattern.as_bytes();
        if bytes.len() > 1 && bytes[0] == b'N' && bytes[1].is_ascii_digit() {
            let count = pattern[1..]
                .parse::<usize>()
                .map_err(|e| invalid(format!("bad random-base count: {}", e)))?;
            return Ok(PatternSpec::Random(count));
        }

        let is_cdna = segment_type == CDNA_LABEL;
        match pattern {
            TRANSCRIPT_PATTERN if is_cdna => return Ok(PatternSpec::Transcript),
            SHORT_TRANSCRIPT_PATTERN if is_cdna => return Ok(PatternSpec::ShortTranscript),
            "A" => return Ok(PatternSpec::Homopolymer(b'A')),
            "T" => return Ok(PatternSpec::Homopolymer(b'T')),
            _ => {}
        }

        if let Some(reason) = literal_issue(pattern) {
            if strict {
                return Err(invalid(reason));
            }
            log::warn!(
                "Pattern `{}` for segment `{}` is used as a literal sequence: {}",
                pattern,
                segment_type,
                reason
            );
        }

        Ok(PatternSpec::Literal(bytes.to_ascii_uppercase()))
    }
}

fn literal_issue(pattern: &str) -> Option<String> {
    if pattern == TRANSCRIPT_PATTERN || pattern == SHORT_TRANSCRIPT_PATTERN {
        return Some(format!(
            "transcript directives are only honoured for `{}` segments",
            CDNA_LABEL
        ));
    }
    pattern
        .chars()
        .find(|c| !matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N'))
        .map(|c| format!("unexpected character `{}`", c))
}

impl Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSpec::Random(k) => write!(f, "N{}", k),
            PatternSpec::Transcript => write!(f, "{}", TRANSCRIPT_PATTERN),
            PatternSpec::ShortTranscript => write!(f, "{}", SHORT_TRANSCRIPT_PATTERN),
            PatternSpec::Homopolymer(base) => write!(f, "{}", *base as char),
            PatternSpec::Literal(seq) => write!(f, "{}", String::from_utf8_lossy(seq)),
        }
    }
}
