pub mod architecture;
pub mod length_range;
pub mod pattern;
pub mod reference;

use std::sync::Arc;

/// Per-base segment tag. Cloning a label clones the handle, not the text.
pub type Label = Arc<str>;

// re-export for cleaner imports
pub use self::architecture::{ArchitectureSpec, Segment};
pub use self::length_range::LengthRange;
pub use self::pattern::PatternSpec;
pub use self::reference::{ReferencePool, ReferenceRecord};
