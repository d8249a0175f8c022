//! # tranq-sim: labeled training-read simulator
//!
//! Generates synthetic nanopore-style reads for training a per-base
//! segmentation model. Every base of every read carries the label of the
//! architecture segment it came from.
//!
//! ## Key Features
//!
//! - **Architecture driven** - reads are assembled from an ordered list of
//!   segment patterns (literals, random stretches, homopolymers, cDNA inserts)
//! - **Structural corruption** - concatenated reads and repeated adapters,
//!   mixed in at a configurable fraction
//! - **Label-aware errors** - mismatches, insertions and deletions with
//!   separate rates for homopolymers and protected bases
//! - **Reverse-complement augmentation** - optional doubling of each batch
//! - **Reproducible** - a seed fixes the batch regardless of worker count
//!
//! ## Example Workflow
//!
//! ```bash
//! tranq config --output sim.toml
//! tranq simulate --config sim.toml
//! ```
//!
//! ```rust
//! use tranq_core::{ArchitectureSpec, LengthRange, ReferencePool};
//! use tranq_sim::{generate_training_reads, SimulationParams};
//!
//! let arch = ArchitectureSpec::new(
//!     &["5adapter", "barcode", "cDNA", "polyA", "3adapter"],
//!     &["ACGTACGT", "N12", "NN", "A", "TTGCA"],
//! ).unwrap();
//! let params = SimulationParams {
//!     num_reads: 50,
//!     length_range: LengthRange::new(30, 60).unwrap(),
//!     invalid_fraction: 0.2,
//!     rc: true,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let (sequences, labels) = generate_training_reads(params, &arch, &ReferencePool::empty()).unwrap();
//! assert_eq!(sequences.len(), 100);
//! assert_eq!(labels.len(), 100);
//! ```

pub mod assemble;
pub mod augment;
pub mod config;
pub mod consts;
pub mod corrupt;
pub mod error_model;
pub mod errors;
pub mod models;
pub mod segment;
pub mod simulate;
pub mod stats;
pub mod writer;

pub use assemble::generate_valid_read;
pub use augment::augment_reverse_complement;
pub use config::{ArchitectureConfig, SimulationConfig};
pub use corrupt::generate_invalid_read;
pub use error_model::{ErrorProfile, introduce_errors};
pub use errors::SimulationError;
pub use models::{Batch, DispatchMode, LabeledSequence, ReadKind, SimulatedRead, StrandFlip};
pub use segment::generate_segment;
pub use simulate::{BatchSimulator, SimulationParams, generate_training_reads};
pub use stats::BatchStats;
pub use writer::write_batch;
