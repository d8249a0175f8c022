use indicatif::{ProgressBar, ProgressStyle};
use rand::prelude::*;
use rayon::prelude::*;

use tranq_core::{ArchitectureSpec, LengthRange, ReferencePool};

use crate::assemble::generate_valid_read;
use crate::augment::augment_reverse_complement;
use crate::consts::{DEFAULT_MAX_INSERT_LEN, DEFAULT_MIN_INSERT_LEN, DEFAULT_NUM_READS};
use crate::corrupt::generate_invalid_read;
use crate::error_model::{introduce_errors, ErrorProfile};
use crate::errors::{Result, SimulationError};
use crate::models::{Batch, DispatchMode, ReadKind, SimulatedRead};

// ============================================================================
// Parameters
// ============================================================================

/// Everything a batch needs besides the architecture and the reference pool.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub num_reads: usize,
    pub length_range: LengthRange,
    pub errors: ErrorProfile,
    /// Probability that a read is structurally corrupted (0-1)
    pub invalid_fraction: f64,
    /// 1 runs on the calling thread; more builds a worker pool for the call
    pub num_workers: usize,
    /// Append reverse-complement copies of every read
    pub rc: bool,
    pub seed: Option<u64>,
    pub dispatch: DispatchMode,
    pub show_progress: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_reads: DEFAULT_NUM_READS,
            length_range: LengthRange {
                min: DEFAULT_MIN_INSERT_LEN,
                max: DEFAULT_MAX_INSERT_LEN,
            },
            errors: ErrorProfile::default(),
            invalid_fraction: 0.0,
            num_workers: 1,
            rc: false,
            seed: None,
            dispatch: DispatchMode::Single,
            show_progress: false,
        }
    }
}

// ============================================================================
// Batch Simulation
// ============================================================================

///
/// Generates batches of labeled training reads.
///
/// # Example
/// ```
/// use tranq_core::{ArchitectureSpec, LengthRange, ReferencePool};
/// use tranq_sim::{BatchSimulator, SimulationParams};
///
/// let arch = ArchitectureSpec::new(&["5adapter", "cDNA", "3adapter"], &["ACGT", "NN", "TTTT"]).unwrap();
/// let params = SimulationParams {
///     num_reads: 10,
///     length_range: LengthRange::new(10, 10).unwrap(),
///     seed: Some(42),
///     ..Default::default()
/// };
///
/// let batch = BatchSimulator::new(params)
///     .generate_training_reads(&arch, &ReferencePool::empty())
///     .unwrap();
/// assert_eq!(batch.len(), 10);
/// ```
pub struct BatchSimulator {
    params: SimulationParams,
}

impl BatchSimulator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    ///
    /// Simulate a full batch, then augment it if `rc` is set.
    ///
    /// With one worker the batch is generated on the calling thread. With more,
    /// a pool of `num_workers` threads is built for this call only and the
    /// batch is handed to it according to the dispatch mode. Any failure
    /// aborts the whole call; no partial batch is returned.
    ///
    pub fn generate_training_reads(
        &self,
        architecture: &ArchitectureSpec,
        references: &ReferencePool,
    ) -> Result<Batch> {
        self.validate(architecture)?;

        let params = &self.params;
        log::info!(
            "Simulating {} reads (invalid fraction {:.2}, {} worker(s), {:?} dispatch)",
            params.num_reads,
            params.invalid_fraction,
            params.num_workers,
            params.dispatch
        );

        let pb = self.progress_bar();
        let reads = if params.num_workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(params.num_workers)
                .thread_name(|idx| format!("tranq-worker-{}", idx))
                .build()?;
            log::debug!("Built worker pool with {} threads", pool.current_num_threads());

            pool.install(|| self.dispatch(architecture, references, &pb))?
        } else {
            self.dispatch(architecture, references, &pb)?
        };
        pb.finish_with_message(format!("Simulated {} reads", reads.len()));

        let mut batch = Batch::new(reads);
        if params.rc {
            augment_reverse_complement(&mut batch)?;
        }

        log::info!("Batch complete: {} reads", batch.len());
        Ok(batch)
    }

    fn validate(&self, architecture: &ArchitectureSpec) -> Result<()> {
        if self.params.num_workers == 0 {
            return Err(SimulationError::InvalidWorkerCount);
        }
        if self.params.invalid_fraction > 0.0 && architecture.len() < 2 {
            return Err(SimulationError::TooFewSegments(architecture.len()));
        }
        self.params.errors.warn_if_saturated();
        Ok(())
    }

    /// Runs inside the worker pool when there is one.
    fn dispatch(
        &self,
        architecture: &ArchitectureSpec,
        references: &ReferencePool,
        pb: &ProgressBar,
    ) -> Result<Vec<SimulatedRead>> {
        match self.params.dispatch {
            DispatchMode::Single => {
                let mut rng = self.batch_rng();
                self.simulate_batch(architecture, references, &mut rng, pb)
            }
            DispatchMode::PerRead if self.params.num_workers > 1 => (0..self.params.num_reads)
                .into_par_iter()
                .map(|idx| {
                    let mut rng = self.read_rng(idx);
                    let read = self.simulate_read(architecture, references, &mut rng);
                    pb.inc(1);
                    read
                })
                .collect(),
            DispatchMode::PerRead => (0..self.params.num_reads)
                .map(|idx| {
                    let mut rng = self.read_rng(idx);
                    let read = self.simulate_read(architecture, references, &mut rng);
                    pb.inc(1);
                    read
                })
                .collect(),
        }
    }

    /// Generate `num_reads` reads in order from a single RNG stream.
    pub fn simulate_batch<R: Rng>(
        &self,
        architecture: &ArchitectureSpec,
        references: &ReferencePool,
        rng: &mut R,
        pb: &ProgressBar,
    ) -> Result<Vec<SimulatedRead>> {
        let mut reads = Vec::with_capacity(self.params.num_reads);
        for _ in 0..self.params.num_reads {
            reads.push(self.simulate_read(architecture, references, rng)?);
            pb.inc(1);
        }
        Ok(reads)
    }

    /// One read: pick valid or corrupted, then inject sequencing errors.
    pub fn simulate_read<R: Rng>(
        &self,
        architecture: &ArchitectureSpec,
        references: &ReferencePool,
        rng: &mut R,
    ) -> Result<SimulatedRead> {
        let params = &self.params;
        let (read, kind) = if rng.gen::<f64>() < params.invalid_fraction {
            generate_invalid_read(architecture, params.length_range, references, rng)?
        } else {
            (
                generate_valid_read(architecture, params.length_range, references, rng),
                ReadKind::Valid,
            )
        };

        let read = introduce_errors(&read, &params.errors, rng);
        Ok(SimulatedRead::new(read, kind))
    }

    fn batch_rng(&self) -> StdRng {
        match self.params.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }

    fn read_rng(&self, idx: usize) -> StdRng {
        match self.params.seed {
            Some(s) => StdRng::seed_from_u64(s.wrapping_add(idx as u64)),
            None => StdRng::from_entropy(),
        }
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.params.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(self.params.num_reads as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} reads simulated")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}

///
/// Convenience wrapper: simulate a batch and return the two order-aligned
/// output collections (sequences, per-base labels).
///
pub fn generate_training_reads(
    params: SimulationParams,
    architecture: &ArchitectureSpec,
    references: &ReferencePool,
) -> Result<(Vec<Vec<u8>>, Vec<Vec<tranq_core::Label>>)> {
    let batch = BatchSimulator::new(params).generate_training_reads(architecture, references)?;
    Ok(batch.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn architecture() -> ArchitectureSpec {
        ArchitectureSpec::new(
            &["5adapter", "barcode", "cDNA", "polyA", "3adapter"],
            &["CTACACGACG", "N12", "NN", "A", "AGATCGGAAG"],
        )
        .unwrap()
    }

    fn params(num_reads: usize, seed: u64) -> SimulationParams {
        SimulationParams {
            num_reads,
            length_range: LengthRange::new(20, 80).unwrap(),
            errors: ErrorProfile::new(0.05, 0.05, 0.05, 0.02, 2),
            invalid_fraction: 0.3,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_zero_workers_rejected(architecture: ArchitectureSpec) {
        let sim = BatchSimulator::new(SimulationParams {
            num_workers: 0,
            ..params(5, 1)
        });
        assert!(matches!(
            sim.generate_training_reads(&architecture, &ReferencePool::empty()),
            Err(SimulationError::InvalidWorkerCount)
        ));
    }

    #[rstest]
    fn test_corruption_needs_two_segments() {
        let arch = ArchitectureSpec::new(&["cDNA"], &["NN"]).unwrap();
        let sim = BatchSimulator::new(params(5, 1));
        assert!(matches!(
            sim.generate_training_reads(&arch, &ReferencePool::empty()),
            Err(SimulationError::TooFewSegments(1))
        ));
    }

    #[rstest]
    fn test_single_segment_fine_without_corruption() {
        let arch = ArchitectureSpec::new(&["cDNA"], &["NN"]).unwrap();
        let sim = BatchSimulator::new(SimulationParams {
            invalid_fraction: 0.0,
            ..params(5, 1)
        });
        assert_eq!(sim.generate_training_reads(&arch, &ReferencePool::empty()).unwrap().len(), 5);
    }

    #[rstest]
    fn test_same_seed_same_batch(architecture: ArchitectureSpec) {
        let a = BatchSimulator::new(params(40, 99))
            .generate_training_reads(&architecture, &ReferencePool::empty())
            .unwrap();
        let b = BatchSimulator::new(params(40, 99))
            .generate_training_reads(&architecture, &ReferencePool::empty())
            .unwrap();
        assert_eq!(a.reads, b.reads);
    }

    #[rstest]
    fn test_pool_dispatch_matches_synchronous(architecture: ArchitectureSpec) {
        let sync = BatchSimulator::new(params(30, 7))
            .generate_training_reads(&architecture, &ReferencePool::empty())
            .unwrap();
        let pooled = BatchSimulator::new(SimulationParams {
            num_workers: 3,
            ..params(30, 7)
        })
        .generate_training_reads(&architecture, &ReferencePool::empty())
        .unwrap();

        assert_eq!(sync.reads, pooled.reads);
    }

    #[rstest]
    fn test_per_read_dispatch_independent_of_worker_count(architecture: ArchitectureSpec) {
        let run = |workers: usize| {
            BatchSimulator::new(SimulationParams {
                num_workers: workers,
                dispatch: DispatchMode::PerRead,
                ..params(30, 13)
            })
            .generate_training_reads(&architecture, &ReferencePool::empty())
            .unwrap()
        };
        assert_eq!(run(1).reads, run(4).reads);
    }

    #[rstest]
    fn test_into_parts_sizes_with_rc(architecture: ArchitectureSpec) {
        let (sequences, labels) = generate_training_reads(
            SimulationParams {
                rc: true,
                ..params(12, 3)
            },
            &architecture,
            &ReferencePool::empty(),
        )
        .unwrap();

        assert_eq!(sequences.len(), 24);
        assert_eq!(labels.len(), 24);
        for (seq, lbl) in sequences.iter().zip(labels.iter()) {
            assert_eq!(seq.len(), lbl.len());
        }
    }
}
