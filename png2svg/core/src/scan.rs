//! Raster-order searches for uncovered pixels.
//!
//! Both scans start at `(from_x, from_y)`, honour `from_x` on the first row
//! only and continue from column 0 on every following row. Rows above
//! `from_y` are assumed to be fully covered already.

use crate::error::{Result, VectorizeError};
use crate::grid::PixelGrid;

impl PixelGrid {
    fn scan_uncovered(&self, from_x: u32, from_y: u32) -> Option<(u32, u32)> {
        let mut start_x = from_x;
        for y in from_y..self.height() {
            for x in start_x..self.width() {
                if !self.is_covered(x, y) {
                    return Some((x, y));
                }
            }
            start_x = 0;
        }
        None
    }

    /// Checks whether every pixel from `(from_x, from_y)` onwards is covered.
    pub fn is_fully_covered(&self, from_x: u32, from_y: u32) -> bool {
        self.scan_uncovered(from_x, from_y).is_none()
    }

    /// Finds the first uncovered pixel from `(from_x, from_y)` onwards.
    ///
    /// Returns [`VectorizeError::Exhausted`] when there is none, so callers
    /// that loop on this should check [`PixelGrid::is_fully_covered`] first.
    pub fn first_uncovered(&self, from_x: u32, from_y: u32) -> Result<(u32, u32)> {
        self.scan_uncovered(from_x, from_y)
            .ok_or(VectorizeError::Exhausted { from_x, from_y })
    }
}
