//! # tranq-core
//!
//! Data model shared by the tranq read simulator: read architectures, the
//! pattern specs that describe each segment, length ranges, and the reference
//! pool used to draw cDNA inserts.
//!
//! ```rust
//! use tranq_core::models::ArchitectureSpec;
//!
//! let arch = ArchitectureSpec::new(
//!     &["5adapter", "cDNA", "3adapter"],
//!     &["ACGT", "NN", "TTTT"],
//! ).unwrap();
//! assert_eq!(arch.len(), 3);
//! ```

pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::TranqError;
pub use models::{ArchitectureSpec, Label, LengthRange, PatternSpec, ReferencePool, ReferenceRecord, Segment};
