pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

pub const POLY_A_LABEL: &str = "polyA";
pub const POLY_T_LABEL: &str = "polyT";
pub const CDNA_LABEL: &str = "cDNA";

/// Bases carrying this label are never touched by error injection.
pub const PROTECTED_LABEL: &str = "ACC";

pub const TRANSCRIPT_PATTERN: &str = "NN";
pub const SHORT_TRANSCRIPT_PATTERN: &str = "RN";

/// Exclusive upper bound for `RN` insert lengths and homopolymer runs.
pub const MAX_SHORT_SEGMENT_LEN: usize = 50;
