//! Volume containers.
//!
//! Components
//! - `RleImage`: the run-length encoded N-D container. An (N−1)-dimensional
//!   dense grid of scanlines, each scanline a compact run list along axis 0.
//! - `DenseImage`: the conversion endpoint with one pixel per grid position.
//! - `grid`: the internal walker over the scanline grid.
//!
//! Design goals
//! - Complete scanlines only: the buffered region always spans the full
//!   axis-0 extent, so every line is a self-contained run list.
//! - Per-pixel accessors exist but walk the run list; the fast path for bulk
//!   access is the cursor API in [`crate::cursor`].

pub(crate) mod grid;

mod dense;

pub use dense::DenseImage;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::RleError;
use crate::geometry::Geometry;
use crate::line::{Line, PixelValue, RunCounter, Segment};
use crate::region::Region;
use crate::stats::VolumeStats;

/// Run-length encoded N-dimensional image.
///
/// Saves memory for label images at the expense of processing time; for
/// ordinary high-entropy images the encoding is counterproductive. Pixel
/// type `P` needs nothing but equality; counter type `C` must hold the
/// axis-0 extent (checked at allocation).
///
/// `on_the_fly_cleanup` controls whether each write restores canonical form
/// locally (no two adjacent runs share a value). It defaults to on, which
/// usually performs best; turning it back on after a fragmented editing
/// session re-canonicalises the whole volume.
#[derive(Clone, Debug)]
pub struct RleImage<P, C = u16, const D: usize = 3> {
    largest: Region<D>,
    buffered: Region<D>,
    requested: Region<D>,
    geometry: Geometry<D>,
    lines: Vec<Line<P, C>>,
    on_the_fly_cleanup: bool,
}

impl<P: PixelValue, C: RunCounter, const D: usize> Default for RleImage<P, C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PixelValue, C: RunCounter, const D: usize> RleImage<P, C, D> {
    /// An empty image; configure regions, then [`RleImage::allocate`].
    pub fn new() -> Self {
        Self {
            largest: Region::default(),
            buffered: Region::default(),
            requested: Region::default(),
            geometry: Geometry::default(),
            lines: Vec::new(),
            on_the_fly_cleanup: true,
        }
    }

    /// Set all three region descriptors to `region`.
    pub fn set_regions(&mut self, region: Region<D>) {
        self.largest = region;
        self.buffered = region;
        self.requested = region;
    }

    pub fn set_largest_possible_region(&mut self, region: Region<D>) {
        self.largest = region;
    }

    pub fn set_buffered_region(&mut self, region: Region<D>) {
        self.buffered = region;
    }

    pub fn set_requested_region(&mut self, region: Region<D>) {
        self.requested = region;
    }

    #[inline]
    pub fn largest_possible_region(&self) -> &Region<D> {
        &self.largest
    }

    #[inline]
    pub fn buffered_region(&self) -> &Region<D> {
        &self.buffered
    }

    #[inline]
    pub fn requested_region(&self) -> &Region<D> {
        &self.requested
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry<D> {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry<D>) {
        self.geometry = geometry;
    }

    pub fn index_to_physical_point(&self, index: [i64; D]) -> nalgebra::SVector<f64, D> {
        self.geometry.index_to_physical_point(index)
    }

    /// Complete run-length lines have to be buffered.
    fn require_complete_lines(&self) -> Result<(), RleError> {
        if self.buffered.size[0] != self.largest.size[0] {
            return Err(RleError::GeometryViolation {
                buffered: self.buffered.size[0],
                largest: self.largest.size[0],
            });
        }
        Ok(())
    }

    /// Allocate storage for the buffered region. Afterwards every buffered
    /// line is a single run of `P::default()` spanning the axis-0 extent.
    ///
    /// Fails with [`RleError::GeometryViolation`] unless the buffered region
    /// spans the full axis-0 extent, and with [`RleError::CounterOverflow`]
    /// if that extent does not fit in `C`.
    pub fn allocate(&mut self) -> Result<(), RleError> {
        self.require_complete_lines()?;
        let extent = self.largest.size[0];
        if extent as u64 > C::MAX_RUN {
            return Err(RleError::CounterOverflow {
                extent,
                max: C::MAX_RUN,
            });
        }
        let cells = self.buffered.grid_len();
        debug!(
            "RleImage::allocate {cells} lines of extent {extent} ({} counter bits)",
            std::mem::size_of::<C>() * 8
        );
        self.lines = vec![Line::filled(self.buffered.size[0], P::default()); cells];
        Ok(())
    }

    /// Re-encode every buffered line as a single run of `value`. Call after
    /// [`RleImage::allocate`].
    pub fn fill(&mut self, value: P) {
        let line = Line::filled(self.buffered.size[0], value);
        self.lines.fill(line);
    }

    /// Merge adjacent same-value runs in every buffered line. Idempotent;
    /// lines are independent, so the pass is parallel per line.
    pub fn clean(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.lines.par_iter_mut().for_each(Line::clean);
        }
        #[cfg(not(feature = "parallel"))]
        {
            for line in &mut self.lines {
                line.clean();
            }
        }
    }

    /// Should same-valued runs be merged as writes happen?
    #[inline]
    pub fn on_the_fly_cleanup(&self) -> bool {
        self.on_the_fly_cleanup
    }

    /// Toggle on-the-fly cleanup. Turning it on re-canonicalises the volume;
    /// turning it off changes nothing until the next write.
    pub fn set_on_the_fly_cleanup(&mut self, value: bool) {
        if value == self.on_the_fly_cleanup {
            return;
        }
        self.on_the_fly_cleanup = value;
        if self.on_the_fly_cleanup {
            debug!("RleImage: on-the-fly cleanup re-enabled, cleaning volume");
            self.clean();
        }
    }

    /// Pixel at `index`. Walks the run list of its line: O(segments). Slow;
    /// prefer the cursors for bulk access.
    pub fn get_pixel(&self, index: [i64; D]) -> Result<P, RleError> {
        self.require_complete_lines()?;
        debug_assert!(self.buffered.contains_index(index));
        let x = (index[0] - self.buffered.index[0]) as usize;
        let line = &self.lines[self.buffered.grid_offset(index)];
        line.value_at(x).ok_or(RleError::OutOfLineWalk)
    }

    /// Write the pixel at `index` through the line-edit primitive. Walks the
    /// run list first: O(segments). Slow; prefer a mutable cursor for sweeps.
    pub fn set_pixel(&mut self, index: [i64; D], value: P) -> Result<(), RleError> {
        self.require_complete_lines()?;
        debug_assert!(self.buffered.contains_index(index));
        let cleanup = self.on_the_fly_cleanup;
        let x = (index[0] - self.buffered.index[0]) as usize;
        let offset = self.buffered.grid_offset(index);
        let line = &mut self.lines[offset];
        let mut pos = line.locate(x).ok_or(RleError::OutOfLineWalk)?;
        line.edit(&mut pos, value, cleanup);
        Ok(())
    }

    /// Read access to the scanline through `index` (axis 0 ignored).
    pub fn line_at(&self, index: [i64; D]) -> &Line<P, C> {
        &self.lines[self.buffered.grid_offset(index)]
    }

    #[inline]
    pub(crate) fn lines(&self) -> &[Line<P, C>] {
        &self.lines
    }

    #[inline]
    pub(crate) fn lines_mut(&mut self) -> &mut [Line<P, C>] {
        &mut self.lines
    }

    /// Footprint and encoding statistics for the buffered region.
    pub fn stats(&self) -> VolumeStats {
        let line_count = self.lines.len();
        let segment_count: usize = self.lines.iter().map(Line::len).sum();
        let compressed_bytes = segment_count * std::mem::size_of::<Segment<P, C>>()
            + line_count * std::mem::size_of::<Line<P, C>>();
        let dense_bytes = self.buffered.num_pixels() * std::mem::size_of::<P>();
        VolumeStats {
            line_count,
            segment_count,
            compressed_bytes,
            dense_bytes,
            compression_ratio: if dense_bytes == 0 {
                0.0
            } else {
                compressed_bytes as f64 / dense_bytes as f64
            },
            on_the_fly_cleanup: self.on_the_fly_cleanup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_requires_complete_lines() {
        let mut img = RleImage::<u8, u16, 2>::new();
        img.set_largest_possible_region(Region::sized([8, 4]));
        img.set_buffered_region(Region::new([0, 1], [6, 2]));
        assert_eq!(
            img.allocate(),
            Err(RleError::GeometryViolation {
                buffered: 6,
                largest: 8
            })
        );
    }

    #[test]
    fn allocate_checks_counter_capacity() {
        let mut img = RleImage::<u8, u8, 2>::new();
        img.set_regions(Region::sized([300, 2]));
        assert_eq!(
            img.allocate(),
            Err(RleError::CounterOverflow {
                extent: 300,
                max: u8::MAX as u64
            })
        );
    }

    #[test]
    fn buffered_region_may_shrink_on_outer_axes() {
        let mut img = RleImage::<u8, u16, 3>::new();
        img.set_largest_possible_region(Region::sized([16, 4, 4]));
        img.set_buffered_region(Region::new([0, 1, 1], [16, 2, 2]));
        img.set_requested_region(Region::new([0, 1, 1], [16, 2, 2]));
        img.allocate().expect("complete lines are buffered");
        assert_eq!(img.lines().len(), 4);
        assert_eq!(img.get_pixel([3, 2, 2]), Ok(0));
    }
}
