use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tranq_core::{ArchitectureSpec, LengthRange};

use crate::consts::*;
use crate::error_model::ErrorProfile;
use crate::errors::{Result, SimulationError};
use crate::models::DispatchMode;
use crate::simulate::SimulationParams;

/// The read layout as two order-aligned lists.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArchitectureConfig {
    pub order: Vec<String>,
    pub patterns: Vec<String>,
}

///
/// Configuration for one simulation run.
///
/// # Example
/// ```toml
/// num_reads = 1000
/// length_range = [50, 500]
/// invalid_fraction = 0.1
/// rc = true
/// seed = 42
///
/// [errors]
/// mismatch_rate = 0.05
/// insertion_rate = 0.05
/// deletion_rate = 0.06
/// polyt_error_rate = 0.02
/// max_insertions = 1
///
/// [architecture]
/// order = ["5adapter", "cDNA", "polyA", "3adapter"]
/// patterns = ["ACGT", "NN", "A", "TTTT"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_num_reads")]
    pub num_reads: usize,
    #[serde(default = "default_length_range")]
    pub length_range: (usize, usize),
    #[serde(default)]
    pub invalid_fraction: f64,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    #[serde(default)]
    pub rc: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub dispatch: DispatchMode,
    #[serde(default)]
    pub strict_patterns: bool,
    #[serde(default)]
    pub show_progress: bool,
    /// FASTA (optionally gzipped) with transcripts for cDNA inserts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub errors: ErrorProfile,
    pub architecture: ArchitectureConfig,
}

// Default value functions
fn default_num_reads() -> usize {
    DEFAULT_NUM_READS
}

fn default_length_range() -> (usize, usize) {
    (DEFAULT_MIN_INSERT_LEN, DEFAULT_MAX_INSERT_LEN)
}

fn default_num_workers() -> usize {
    DEFAULT_NUM_WORKERS
}

impl SimulationConfig {
    /// A config with every option filled in, used by `tranq config`.
    pub fn example() -> Self {
        Self {
            num_reads: DEFAULT_NUM_READS,
            length_range: default_length_range(),
            invalid_fraction: 0.1,
            num_workers: DEFAULT_NUM_WORKERS,
            rc: true,
            seed: Some(42),
            dispatch: DispatchMode::Single,
            strict_patterns: false,
            show_progress: true,
            reference: Some(PathBuf::from("transcripts.fa.gz")),
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            errors: ErrorProfile::new(0.05, 0.05, 0.06, 0.02, DEFAULT_MAX_INSERTIONS),
            architecture: ArchitectureConfig {
                order: ["5adapter", "barcode", "cDNA", "polyA", "3adapter"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                patterns: ["CTACACGACGCTCTTCCGATCT", "N16", "NN", "A", "AGATCGGAAGAGCGTCGTGTAG"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        }
    }

    /// Helper function to resolve a path relative to a base directory
    /// If the path is already absolute, returns it unchanged
    fn resolve_config_path(path: &Path, base_dir: &Path) -> PathBuf {
        if path.is_absolute() || path.as_os_str().is_empty() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    ///
    /// Read a TOML config. `reference` and `output` are resolved relative to
    /// the config file's directory.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SimulationError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content)?;

        if let Some(config_dir) = path.parent() {
            config.reference = config
                .reference
                .map(|p| Self::resolve_config_path(&p, config_dir));
            config.output = config
                .output
                .map(|p| Self::resolve_config_path(&p, config_dir));
        }

        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn architecture(&self) -> Result<ArchitectureSpec> {
        let arch = ArchitectureSpec::build(
            &self.architecture.order,
            &self.architecture.patterns,
            self.strict_patterns,
        )?;
        Ok(arch)
    }

    pub fn to_params(&self) -> Result<SimulationParams> {
        Ok(SimulationParams {
            num_reads: self.num_reads,
            length_range: LengthRange::try_from(self.length_range)?,
            errors: self.errors,
            invalid_fraction: self.invalid_fraction,
            num_workers: self.num_workers,
            rc: self.rc,
            seed: self.seed,
            dispatch: self.dispatch,
            show_progress: self.show_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;
    use tranq_core::{PatternSpec, TranqError};

    const MINIMAL: &str = r#"
[architecture]
order = ["5adapter", "cDNA", "3adapter"]
patterns = ["ACGT", "NN", "TTTT"]
"#;

    #[rstest]
    fn test_minimal_config_uses_defaults() {
        let config: SimulationConfig = toml::from_str(MINIMAL).unwrap();

        assert_eq!(config.num_reads, DEFAULT_NUM_READS);
        assert_eq!(config.length_range, (DEFAULT_MIN_INSERT_LEN, DEFAULT_MAX_INSERT_LEN));
        assert_eq!(config.num_workers, 1);
        assert_eq!(config.dispatch, DispatchMode::Single);
        assert_eq!(config.errors, ErrorProfile::error_free());
        assert!(config.seed.is_none());

        let arch = config.architecture().unwrap();
        assert_eq!(arch.segments()[1].pattern, PatternSpec::Transcript);
    }

    #[rstest]
    fn test_full_config() {
        let raw = r#"
num_reads = 20
length_range = [10, 10]
invalid_fraction = 0.5
num_workers = 4
rc = true
seed = 7
dispatch = "per_read"

[errors]
mismatch_rate = 0.1
polyt_error_rate = 0.3

[architecture]
order = ["5adapter", "cDNA"]
patterns = ["ACGT", "RN"]
"#;
        let config: SimulationConfig = toml::from_str(raw).unwrap();
        let params = config.to_params().unwrap();

        assert_eq!(params.num_reads, 20);
        assert!(params.length_range.is_degenerate());
        assert_eq!(params.dispatch, DispatchMode::PerRead);
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.errors.mismatch_rate, 0.1);
        assert_eq!(params.errors.insertion_rate, 0.0);
        assert_eq!(params.errors.max_insertions, DEFAULT_MAX_INSERTIONS);
    }

    #[rstest]
    fn test_inverted_length_range_rejected() {
        let mut config: SimulationConfig = toml::from_str(MINIMAL).unwrap();
        config.length_range = (100, 10);

        assert!(matches!(
            config.to_params(),
            Err(SimulationError::Core(TranqError::InvalidLengthRange(100, 10)))
        ));
    }

    #[rstest]
    fn test_strict_patterns() {
        let mut config: SimulationConfig = toml::from_str(MINIMAL).unwrap();
        config.architecture.patterns[0] = "ACGU".to_string();

        assert!(config.architecture().is_ok());
        config.strict_patterns = true;
        assert!(config.architecture().is_err());
    }

    #[rstest]
    fn test_round_trip_and_relative_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("sim.toml");

        let example = SimulationConfig::example();
        example.to_file(&path).unwrap();
        let loaded = SimulationConfig::from_file(&path).unwrap();

        assert_eq!(loaded.architecture, example.architecture);
        assert_eq!(loaded.errors, example.errors);
        assert_eq!(loaded.seed, Some(42));
        assert_eq!(loaded.reference, Some(temp_dir.path().join("transcripts.fa.gz")));
        assert_eq!(loaded.output, Some(temp_dir.path().join(DEFAULT_OUTPUT)));
    }

    #[rstest]
    fn test_missing_config_file() {
        let result = SimulationConfig::from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(SimulationError::ConfigRead { .. })));
    }
}
