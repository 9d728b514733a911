//! Integration region parsed from a template block.

use super::Point3;
use crate::document::BLOCK_LINES;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// The integration region of a solver template.
///
/// The plane is anchored at `p1` and spanned by the vectors
/// `u = p2 - p1` and `v = p3 - p1`. `k` and `l` are the resolution
/// parameters for the `u` and `v` directions; `m` is a third solver
/// parameter carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionGeometry {
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
    pub k: i64,
    pub l: i64,
    pub m: i64,
}

impl RegionGeometry {
    /// Build a region from an origin and two spanning vectors.
    #[inline]
    pub fn from_vectors(p1: Point3, u: Point3, v: Point3, k: i64, l: i64, m: i64) -> Self {
        Self {
            p1,
            p2: p1 + u,
            p3: p1 + v,
            k,
            l,
            m,
        }
    }

    /// Parse the six block lines immediately following the marker.
    ///
    /// `first_line_no` is the 1-based line number of `lines[0]` in the
    /// source document, used for error positions.
    pub fn from_block(lines: &[&str], first_line_no: usize) -> Result<Self> {
        if lines.len() < BLOCK_LINES {
            return Err(Error::TruncatedBlock {
                expected: BLOCK_LINES,
                found: lines.len(),
            });
        }

        let point = |idx: usize| -> Result<Point3> {
            lines[idx].parse().map_err(|e| Error::Parse {
                line: first_line_no + idx,
                message: format!("{e}"),
            })
        };
        let int = |idx: usize| -> Result<i64> {
            lines[idx].trim().parse().map_err(|_| Error::Parse {
                line: first_line_no + idx,
                message: format!("invalid integer `{}`", lines[idx].trim()),
            })
        };

        Ok(Self {
            p1: point(0)?,
            p2: point(1)?,
            k: int(2)?,
            p3: point(3)?,
            l: int(4)?,
            m: int(5)?,
        })
    }

    /// The spanning vector in the `u` direction (`p2 - p1`).
    #[inline]
    pub fn u(&self) -> Point3 {
        self.p2 - self.p1
    }

    /// The spanning vector in the `v` direction (`p3 - p1`).
    #[inline]
    pub fn v(&self) -> Point3 {
        self.p3 - self.p1
    }

    /// Area of the integration plane.
    #[inline]
    pub fn area(&self) -> f64 {
        super::cross3(self.u(), self.v()).length()
    }

    /// Render the six block lines.
    pub fn block_lines(&self) -> [String; BLOCK_LINES] {
        [
            self.p1.to_string(),
            self.p2.to_string(),
            self.k.to_string(),
            self.p3.to_string(),
            self.l.to_string(),
            self.m.to_string(),
        ]
    }
}
