//! Slicing module - subdivides the integration plane into equal strips.
//!
//! - [`Axis`] - which spanning vector is subdivided
//! - [`Slicer`] - slice request (axis + count)
//! - [`Slices`] - lazy iterator over the per-slice regions

mod slicer;

pub use slicer::{Axis, Slicer, Slices};
