//! Cursors: scanline-oriented traversal of a region of an
//! [`RleImage`](crate::image::RleImage).
//!
//! Components
//! - `RegionCursor` / `RegionCursorMut`: row-major traversal of a buffered
//!   sub-region, wrapping on the axis-0 extent.
//! - `ScanlineCursor` / `ScanlineCursorMut`: the same walk with explicit
//!   line-boundary control; single steps never cross a line.
//! - `IndexedCursor` / `IndexedCursorMut`: adds reverse traversal.
//! - `Cursor`: the operations every cursor shape shares.
//!
//! A cursor holds a borrow of its volume, an (N−1)-D grid position, and a
//! constant-time position inside the current line (segment index plus pixels
//! remaining in that segment), so stepping is O(1) amortised instead of the
//! O(segments) walk a fresh lookup costs.
//!
//! Mutable cursors write through the line-edit primitive, which rewrites the
//! run list of the current line; the writing cursor itself stays on the same
//! logical pixel, while any other position held into that line becomes
//! meaningless. Mutable cursors therefore borrow the volume exclusively.

mod indexed;
mod region;
mod scanline;

pub use indexed::{IndexedCursor, IndexedCursorMut};
pub use region::{RegionCursor, RegionCursorMut};
pub use scanline::{ScanlineCursor, ScanlineCursorMut};

use crate::error::RleError;
use crate::image::grid::GridCursor;
use crate::line::{Line, PixelValue, RunCounter};
use crate::region::Region;

/// Operations shared by every cursor shape.
///
/// `next`/`prev` carry each shape's own stepping semantics: region and
/// indexed cursors wrap on the axis-0 extent, scanline cursors stay inside
/// the current line and leave stepping past its end undefined.
pub trait Cursor {
    type Pixel;

    /// Move to the first pixel of the region.
    fn go_to_begin(&mut self);
    /// Park one past the last pixel of the region.
    fn go_to_end(&mut self);
    fn is_at_begin(&self) -> bool;
    fn is_at_end(&self) -> bool;
    /// Step forward one pixel.
    fn next(&mut self);
    /// Step backward one pixel.
    fn prev(&mut self);
    /// Value under the cursor.
    fn get(&self) -> Self::Pixel;
}

/// State shared by all cursor shapes: the grid cell, the axis-0 window of the
/// walked region (relative to the buffered origin), the current axis-0
/// offset, the cached flat offset of the current line, and the line-local
/// position.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CursorCore<const D: usize> {
    pub grid: GridCursor<D>,
    pub region: Region<D>,
    pub index0: i64,
    pub begin0: i64,
    pub end0: i64,
    pub segment: usize,
    pub remainder: usize,
    pub line_offset: usize,
}

impl<const D: usize> CursorCore<D> {
    pub fn new<P: PixelValue, C: RunCounter>(
        buffered: Region<D>,
        lines: &[Line<P, C>],
        region: Region<D>,
    ) -> Result<Self, RleError> {
        if region.num_pixels() > 0 && !buffered.contains(&region) {
            return Err(RleError::RegionNotBuffered);
        }
        if lines.len() != buffered.grid_len() {
            // Not allocated (or mid-reconfiguration); nothing to walk.
            return Err(RleError::RegionNotBuffered);
        }
        let begin0 = region.index[0] - buffered.index[0];
        let end0 = begin0 + region.size[0] as i64;
        let mut core = Self {
            grid: GridCursor::new(buffered, region),
            region,
            index0: begin0,
            begin0,
            end0,
            segment: 0,
            remainder: 0,
            line_offset: 0,
        };
        if region.num_pixels() > 0 {
            core.seek(lines, begin0);
        } else {
            core.grid.go_to_end();
        }
        Ok(core)
    }

    /// Re-derive the line-local position for axis-0 offset `ind0` on the
    /// current grid cell. O(segments in the line).
    pub fn seek<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>], ind0: i64) {
        self.index0 = ind0;
        self.line_offset = self.grid.offset();
        match lines[self.line_offset].locate(ind0 as usize) {
            Some(pos) => {
                self.segment = pos.segment;
                self.remainder = pos.remainder;
            }
            // Buffered lines always span the full axis-0 extent; a short
            // walk means the run list was corrupted.
            None => panic!("run-length line does not span the buffered axis-0 extent"),
        }
    }

    pub fn value<P: PixelValue, C: RunCounter>(&self, lines: &[Line<P, C>]) -> P {
        lines[self.line_offset].segments()[self.segment].value
    }

    /// Full N-D index of the current pixel.
    pub fn index(&self) -> [i64; D] {
        let mut index = self.grid.index();
        index[0] = self.grid.buffered().index[0] + self.index0;
        index
    }

    /// Comparison key: cursors are ordered by grid cell, then axis-0 offset.
    #[inline]
    pub fn order_key(&self) -> (i64, i64) {
        (self.grid.order_key(), self.index0)
    }

    pub fn go_to_begin<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.begin0 == self.end0 {
            self.go_to_end();
            return;
        }
        self.grid.go_to_begin();
        if self.grid.is_at_end() {
            self.index0 = self.begin0;
        } else {
            self.seek(lines, self.begin0);
        }
    }

    pub fn go_to_end(&mut self) {
        self.grid.go_to_end();
        self.index0 = self.begin0;
    }

    pub fn go_to_reverse_begin<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.begin0 == self.end0 {
            self.go_to_end();
            return;
        }
        self.grid.go_to_reverse_begin();
        if self.grid.is_before_begin() {
            self.index0 = self.begin0;
        } else {
            self.seek(lines, self.end0 - 1);
        }
    }

    #[inline]
    pub fn is_at_begin(&self) -> bool {
        self.index0 == self.begin0 && self.grid.is_at_begin()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index0 == self.begin0 && self.grid.is_at_end()
    }

    #[inline]
    pub fn is_at_reverse_end(&self) -> bool {
        self.grid.is_before_begin()
    }

    /// Region step: forward one pixel, wrapping to the next line at the
    /// region's axis-0 end. Past the last pixel the cursor parks at the end
    /// sentinel; stepping again stays there.
    pub fn step_forward<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.begin0 == self.end0 || self.grid.is_at_end() {
            self.index0 = self.begin0;
            return;
        }
        self.index0 += 1;
        if self.index0 >= self.end0 {
            if self.grid.next() {
                self.seek(lines, self.begin0);
            } else {
                self.index0 = self.begin0;
            }
            return;
        }
        self.remainder -= 1;
        if self.remainder > 0 {
            return;
        }
        self.segment += 1;
        self.remainder = lines[self.line_offset].segments()[self.segment].run();
    }

    /// Region step: backward one pixel, wrapping to the previous line at the
    /// region's axis-0 begin. Before the first pixel the cursor parks at the
    /// reverse-end sentinel; stepping again stays there.
    pub fn step_backward<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.begin0 == self.end0 {
            self.index0 = self.begin0;
            return;
        }
        if self.grid.is_before_begin() {
            self.index0 = self.end0 - 1;
            return;
        }
        self.index0 -= 1;
        if self.index0 < self.begin0 {
            if self.grid.prev() {
                self.seek(lines, self.end0 - 1);
            } else {
                self.index0 = self.end0 - 1;
            }
            return;
        }
        self.remainder += 1;
        if self.remainder <= lines[self.line_offset].segments()[self.segment].run() {
            return;
        }
        self.segment -= 1;
        self.remainder = 1;
    }

    #[inline]
    pub fn is_at_end_of_line(&self) -> bool {
        self.index0 == self.end0
    }

    /// Scanline step: forward one pixel inside the current line. Stepping
    /// while at the end of the line is undefined.
    pub fn step_forward_in_line<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        debug_assert!(!self.is_at_end_of_line(), "stepped past the end of the scanline");
        self.index0 += 1;
        self.remainder -= 1;
        if self.remainder > 0 {
            return;
        }
        if self.is_at_end_of_line() {
            return;
        }
        self.segment += 1;
        self.remainder = lines[self.line_offset].segments()[self.segment].run();
    }

    /// Scanline step: backward one pixel inside the current line. Stepping
    /// while at the begin of the line is undefined.
    pub fn step_backward_in_line<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        debug_assert!(self.index0 > self.begin0, "stepped past the begin of the scanline");
        self.index0 -= 1;
        self.remainder += 1;
        if self.remainder <= lines[self.line_offset].segments()[self.segment].run() {
            return;
        }
        self.segment -= 1;
        self.remainder = 1;
    }

    /// Jump to the first pixel of the current line.
    pub fn go_to_begin_of_line<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        self.seek(lines, self.begin0);
    }

    /// Park one past the last pixel of the current line.
    pub fn go_to_end_of_line<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.end0 == self.begin0 {
            self.index0 = self.end0;
            return;
        }
        self.seek(lines, self.end0 - 1);
        self.index0 = self.end0;
        self.remainder -= 1;
    }

    /// Advance to the first pixel of the next line, or to the end sentinel
    /// when no line remains.
    pub fn next_line<P: PixelValue, C: RunCounter>(&mut self, lines: &[Line<P, C>]) {
        if self.grid.next() {
            self.seek(lines, self.begin0);
        } else {
            self.index0 = self.begin0;
        }
    }
}
