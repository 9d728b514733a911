//! # Planeslice
//!
//! Prepares parameter sweeps for a numerical solver by subdividing the
//! planar integration region embedded in its text input templates.
//!
//! The integration plane is spanned by three points (`p1`, `p2`, `p3`),
//! or equivalently by two vectors anchored at `p1`:
//! - `u = p2 - p1`
//! - `v = p3 - p1`
//!
//! Slicing along one of the two vectors produces N templates whose
//! regions tile the original plane with no gaps or overlaps:
//! - [`Point3`] - double-precision 3D point / vector
//! - [`RegionGeometry`] - the parsed integration region
//! - [`InputDocument`] - a template split around the `.2D_INT` marker
//! - [`Slicer`] - per-slice geometry computation
//!
//! ## Example
//!
//! ```rust,ignore
//! use planeslice::{Axis, InputDocument, Slicer};
//!
//! let doc = InputDocument::from_path("template.inp".as_ref())?;
//! let slicer = Slicer::new(Axis::U, 5)?;
//! for (s, region) in slicer.slices(doc.region()).enumerate() {
//!     std::fs::write(format!("template_{s}.inp"), doc.render_with(&region))?;
//! }
//! ```

pub mod document;
pub mod geometry;
pub mod slice;

// Re-export commonly used types
pub use document::{output_path, write_documents, InputDocument, BLOCK_LINES, MARKER};
pub use geometry::{
    approx_eq, cross3, dot3, points_approx_eq, ParsePointError, Point3, RegionGeometry,
};
pub use slice::{Axis, Slicer, Slices};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for slicing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("marker `.2D_INT` not found in input")]
    MarkerNotFound,

    #[error("marker `.2D_INT` occurs {0} times, expected exactly one")]
    DuplicateMarker(usize),

    #[error("integration block truncated: expected {expected} lines after the marker, found {found}")]
    TruncatedBlock { expected: usize, found: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("slice count must be at least 1")]
    InvalidCount,
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
