//! Scanline cursors: line-local stepping with explicit line-boundary control.
//!
//! The canonical loop:
//!
//! ```text
//! while !cur.is_at_end() {
//!     while !cur.is_at_end_of_line() {
//!         // use cur.get() / cur.set(..)
//!         cur.next();
//!     }
//!     cur.next_line();
//! }
//! ```

use super::{Cursor, CursorCore};
use crate::error::RleError;
use crate::image::RleImage;
use crate::line::{LinePos, PixelValue, RunCounter};
use crate::region::Region;

/// Read-only scanline cursor.
///
/// `next`/`prev` move strictly inside the current line; crossing a line
/// happens only through [`ScanlineCursor::next_line`]. Stepping forward while
/// at the end of the line (or backward while at its begin) is undefined.
#[derive(Clone, Debug)]
pub struct ScanlineCursor<'a, P, C = u16, const D: usize = 3> {
    image: &'a RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> ScanlineCursor<'a, P, C, D> {
    pub fn new(image: &'a RleImage<P, C, D>, region: Region<D>) -> Result<Self, RleError> {
        let core = CursorCore::new(*image.buffered_region(), image.lines(), region)?;
        Ok(Self { image, core })
    }

    pub fn region(&self) -> &Region<D> {
        &self.core.region
    }

    pub fn index(&self) -> [i64; D] {
        self.core.index()
    }

    /// One past the last pixel of the current line's window?
    pub fn is_at_end_of_line(&self) -> bool {
        self.core.is_at_end_of_line()
    }

    /// Advance to the first pixel of the next line (or to the region end).
    pub fn next_line(&mut self) {
        self.core.next_line(self.image.lines());
    }

    pub fn go_to_begin_of_line(&mut self) {
        self.core.go_to_begin_of_line(self.image.lines());
    }

    pub fn go_to_end_of_line(&mut self) {
        self.core.go_to_end_of_line(self.image.lines());
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for ScanlineCursor<'a, P, C, D> {
    type Pixel = P;

    fn go_to_begin(&mut self) {
        self.core.go_to_begin(self.image.lines());
    }

    fn go_to_end(&mut self) {
        self.core.go_to_end();
    }

    fn is_at_begin(&self) -> bool {
        self.core.is_at_begin()
    }

    fn is_at_end(&self) -> bool {
        self.core.is_at_end()
    }

    fn next(&mut self) {
        self.core.step_forward_in_line(self.image.lines());
    }

    fn prev(&mut self) {
        self.core.step_backward_in_line(self.image.lines());
    }

    fn get(&self) -> P {
        self.core.value(self.image.lines())
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialEq for ScanlineCursor<'a, P, C, D> {
    fn eq(&self, other: &Self) -> bool {
        self.core.order_key() == other.core.order_key()
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialOrd for ScanlineCursor<'a, P, C, D> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.core.order_key().cmp(&other.core.order_key()))
    }
}

/// Read-write scanline cursor; see [`ScanlineCursor`] for the stepping
/// contract and [`RegionCursorMut`](super::RegionCursorMut) for the write
/// semantics.
#[derive(Debug)]
pub struct ScanlineCursorMut<'a, P, C = u16, const D: usize = 3> {
    image: &'a mut RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> ScanlineCursorMut<'a, P, C, D> {
    pub fn new(image: &'a mut RleImage<P, C, D>, region: Region<D>) -> Result<Self, RleError> {
        let core = CursorCore::new(*image.buffered_region(), image.lines(), region)?;
        Ok(Self { image, core })
    }

    pub fn region(&self) -> &Region<D> {
        &self.core.region
    }

    pub fn index(&self) -> [i64; D] {
        self.core.index()
    }

    pub fn is_at_end_of_line(&self) -> bool {
        self.core.is_at_end_of_line()
    }

    pub fn next_line(&mut self) {
        self.core.next_line(self.image.lines());
    }

    pub fn go_to_begin_of_line(&mut self) {
        self.core.go_to_begin_of_line(self.image.lines());
    }

    pub fn go_to_end_of_line(&mut self) {
        self.core.go_to_end_of_line(self.image.lines());
    }

    /// Write `value` at the current pixel; the cursor stays on the same
    /// logical pixel while the line merges or splits around it.
    pub fn set(&mut self, value: P) {
        let cleanup = self.image.on_the_fly_cleanup();
        let mut pos = LinePos {
            segment: self.core.segment,
            remainder: self.core.remainder,
        };
        self.image.lines_mut()[self.core.line_offset].edit(&mut pos, value, cleanup);
        self.core.segment = pos.segment;
        self.core.remainder = pos.remainder;
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for ScanlineCursorMut<'a, P, C, D> {
    type Pixel = P;

    fn go_to_begin(&mut self) {
        self.core.go_to_begin(self.image.lines());
    }

    fn go_to_end(&mut self) {
        self.core.go_to_end();
    }

    fn is_at_begin(&self) -> bool {
        self.core.is_at_begin()
    }

    fn is_at_end(&self) -> bool {
        self.core.is_at_end()
    }

    fn next(&mut self) {
        self.core.step_forward_in_line(self.image.lines());
    }

    fn prev(&mut self) {
        self.core.step_backward_in_line(self.image.lines());
    }

    fn get(&self) -> P {
        self.core.value(self.image.lines())
    }
}
