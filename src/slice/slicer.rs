//! Per-slice geometry computation.

use crate::geometry::{Point3, RegionGeometry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The spanning vector along which the plane is subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum Axis {
    /// Slice along `u = p2 - p1`.
    U,
    /// Slice along `v = p3 - p1`.
    V,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::U => write!(f, "u"),
            Axis::V => write!(f, "v"),
        }
    }
}

/// A slice request: subdivide one spanning vector into `count` equal parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slicer {
    axis: Axis,
    count: u32,
}

impl Slicer {
    /// Create a slicer. `count` must be at least 1.
    pub fn new(axis: Axis, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidCount);
        }
        Ok(Self { axis, count })
    }

    /// The subdivided axis.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The number of slices.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Compute the slice geometries for `region`.
    ///
    /// Slice `s` covers the span from `s/count` to `(s+1)/count` of the
    /// chosen vector, so the slices tile the original plane in order,
    /// starting at the original `p1`. The non-chosen vector and the
    /// `k`/`l`/`m` parameters are carried through unchanged.
    pub fn slices(&self, region: &RegionGeometry) -> Slices {
        let (u, v) = (region.u(), region.v());
        let step = match self.axis {
            Axis::U => u,
            Axis::V => v,
        };
        let scale = 1.0 / self.count as f64;
        let (u, v) = match self.axis {
            Axis::U => (u * scale, v),
            Axis::V => (u, v * scale),
        };

        Slices {
            origin: region.p1,
            step,
            u,
            v,
            k: region.k,
            l: region.l,
            m: region.m,
            count: self.count,
            index: 0,
        }
    }
}

/// Lazy iterator over the per-slice regions.
///
/// Finite and restartable: cloning yields an independent iterator over
/// the remaining slices, and a fresh iterator always yields exactly
/// `count` regions in increasing slice order.
#[derive(Debug, Clone)]
pub struct Slices {
    origin: Point3,
    /// Original chosen vector; each slice's origin steps along it.
    step: Point3,
    /// Spanning vectors of one slice (the chosen one already scaled).
    u: Point3,
    v: Point3,
    k: i64,
    l: i64,
    m: i64,
    count: u32,
    index: u32,
}

impl Iterator for Slices {
    type Item = RegionGeometry;

    fn next(&mut self) -> Option<RegionGeometry> {
        if self.index >= self.count {
            return None;
        }
        let fraction = self.index as f64 / self.count as f64;
        self.index += 1;

        let p1 = self.origin + self.step * fraction;
        Some(RegionGeometry::from_vectors(
            p1, self.u, self.v, self.k, self.l, self.m,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slices {}
