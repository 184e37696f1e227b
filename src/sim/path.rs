//! Balloon paths
//!
//! A path is the fixed, ordered list of pixel waypoints a balloon walks,
//! one waypoint per tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Immutable, non-empty sequence of waypoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<IVec2>,
}

impl Path {
    pub fn new(points: Vec<IVec2>) -> Result<Self, SimError> {
        if points.is_empty() {
            return Err(SimError::EmptyPath);
        }
        Ok(Self { points })
    }

    /// Vertical lane at x = 100 from y = 50 down to y = 359
    pub fn straight_lane() -> Self {
        Self {
            points: (50..360).map(|y| IVec2::new(100, y)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Bounds-checked waypoint lookup
    pub fn at(&self, index: usize) -> Result<IVec2, SimError> {
        self.get(index).ok_or(SimError::OutOfRange {
            index,
            len: self.points.len(),
        })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<IVec2> {
        self.points.get(index).copied()
    }

    /// Sub-sequence `[start, end)` with sequence-slicing rules: negative bounds
    /// count back from the end, bounds clamp to the path, and an inverted
    /// range is empty.
    pub fn slice(&self, start: isize, end: isize) -> &[IVec2] {
        let start = self.resolve_bound(start);
        let end = self.resolve_bound(end);
        if start >= end {
            return &[];
        }
        &self.points[start..end]
    }

    fn resolve_bound(&self, bound: isize) -> usize {
        let len = self.points.len() as isize;
        let resolved = if bound < 0 { bound + len } else { bound };
        resolved.clamp(0, len) as usize
    }

    pub fn points(&self) -> &[IVec2] {
        &self.points
    }
}
