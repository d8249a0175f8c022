pub const DEFAULT_NUM_READS: usize = 1000;
pub const DEFAULT_MIN_INSERT_LEN: usize = 50;
pub const DEFAULT_MAX_INSERT_LEN: usize = 500;
pub const DEFAULT_NUM_WORKERS: usize = 1;
pub const DEFAULT_MAX_INSERTIONS: usize = 1;

/// How many copies of the adapter an adapter-repeat corruption prefixes.
pub const ADAPTER_REPEATS: usize = 3;

/// Probability that the second read of a concatenation is kept as-is.
/// The remainder is split evenly between reversal and reverse complement.
pub const CONCAT_KEEP_PROB: f64 = 0.5;
pub const CONCAT_REVERSE_PROB: f64 = 0.25;

pub const DEFAULT_OUTPUT: &str = "reads.jsonl";
