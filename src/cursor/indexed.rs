//! Indexed cursors: region traversal with reverse iteration and arbitrary
//! repositioning.

use super::{Cursor, CursorCore};
use crate::error::RleError;
use crate::image::RleImage;
use crate::line::{LinePos, PixelValue, RunCounter};
use crate::region::Region;

/// Read-only region cursor that also supports reverse traversal:
///
/// ```text
/// cur.go_to_reverse_begin();
/// while !cur.is_at_reverse_end() {
///     // use cur.get(), cur.index()
///     cur.prev();
/// }
/// ```
#[derive(Clone, Debug)]
pub struct IndexedCursor<'a, P, C = u16, const D: usize = 3> {
    image: &'a RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> IndexedCursor<'a, P, C, D> {
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

    /// Move to the last pixel of the region.
    pub fn go_to_reverse_begin(&mut self) {
        self.core.go_to_reverse_begin(self.image.lines());
    }

    /// One before the first pixel of the region?
    pub fn is_at_reverse_end(&self) -> bool {
        self.core.is_at_reverse_end()
    }

    /// Jump to an arbitrary pixel of the walked region. O(segments in the
    /// target line).
    pub fn go_to_index(&mut self, index: [i64; D]) {
        debug_assert!(self.core.region.contains_index(index));
        self.core.grid.set_index(index);
        let ind0 = index[0] - self.core.grid.buffered().index[0];
        self.core.seek(self.image.lines(), ind0);
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for IndexedCursor<'a, P, C, D> {
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
        self.core.step_forward(self.image.lines());
    }

    fn prev(&mut self) {
        self.core.step_backward(self.image.lines());
    }

    fn get(&self) -> P {
        self.core.value(self.image.lines())
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialEq for IndexedCursor<'a, P, C, D> {
    fn eq(&self, other: &Self) -> bool {
        self.core.order_key() == other.core.order_key()
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialOrd for IndexedCursor<'a, P, C, D> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.core.order_key().cmp(&other.core.order_key()))
    }
}

/// Read-write indexed cursor. Reverse traversal is supported in write mode
/// too: the edit primitive keeps the cursor position valid regardless of
/// travel direction.
#[derive(Debug)]
pub struct IndexedCursorMut<'a, P, C = u16, const D: usize = 3> {
    image: &'a mut RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> IndexedCursorMut<'a, P, C, D> {
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

    pub fn go_to_reverse_begin(&mut self) {
        self.core.go_to_reverse_begin(self.image.lines());
    }

    pub fn is_at_reverse_end(&self) -> bool {
        self.core.is_at_reverse_end()
    }

    pub fn go_to_index(&mut self, index: [i64; D]) {
        debug_assert!(self.core.region.contains_index(index));
        self.core.grid.set_index(index);
        let ind0 = index[0] - self.core.grid.buffered().index[0];
        self.core.seek(self.image.lines(), ind0);
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

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for IndexedCursorMut<'a, P, C, D> {
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
        self.core.step_forward(self.image.lines());
    }

    fn prev(&mut self) {
        self.core.step_backward(self.image.lines());
    }

    fn get(&self) -> P {
        self.core.value(self.image.lines())
    }
}
