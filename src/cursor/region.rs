//! Region cursors: row-major traversal with axis-0 wrap.

use super::{Cursor, CursorCore};
use crate::error::RleError;
use crate::image::RleImage;
use crate::line::{LinePos, PixelValue, RunCounter};
use crate::region::Region;

/// Read-only row-major cursor over a buffered sub-region.
///
/// Steps wrap from the end of one scanline's window to the begin of the next
/// line's; past the region's last pixel the cursor parks at an end sentinel.
#[derive(Clone, Debug)]
pub struct RegionCursor<'a, P, C = u16, const D: usize = 3> {
    image: &'a RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> RegionCursor<'a, P, C, D> {
    /// A cursor over `region`, positioned at its first pixel.
    ///
    /// Fails with [`RleError::RegionNotBuffered`] when `region` is not
    /// contained in the image's buffered region.
    pub fn new(image: &'a RleImage<P, C, D>, region: Region<D>) -> Result<Self, RleError> {
        let core = CursorCore::new(*image.buffered_region(), image.lines(), region)?;
        Ok(Self { image, core })
    }

    /// The region this cursor walks.
    pub fn region(&self) -> &Region<D> {
        &self.core.region
    }

    /// N-D index of the current pixel.
    pub fn index(&self) -> [i64; D] {
        self.core.index()
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for RegionCursor<'a, P, C, D> {
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

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialEq for RegionCursor<'a, P, C, D> {
    fn eq(&self, other: &Self) -> bool {
        self.core.order_key() == other.core.order_key()
    }
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> PartialOrd for RegionCursor<'a, P, C, D> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.core.order_key().cmp(&other.core.order_key()))
    }
}

/// Read-write row-major cursor over a buffered sub-region.
///
/// The exclusive borrow of the volume is what makes writing sound: while this
/// cursor exists there can be no other cursor into any line of the volume, so
/// an edit can rewrite the current line's run list freely.
#[derive(Debug)]
pub struct RegionCursorMut<'a, P, C = u16, const D: usize = 3> {
    image: &'a mut RleImage<P, C, D>,
    core: CursorCore<D>,
}

impl<'a, P: PixelValue, C: RunCounter, const D: usize> RegionCursorMut<'a, P, C, D> {
    /// A cursor over `region`, positioned at its first pixel.
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

    /// Write `value` at the current pixel through the line-edit primitive.
    /// The line's run list may merge or split; this cursor keeps denoting
    /// the same logical pixel.
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

impl<'a, P: PixelValue, C: RunCounter, const D: usize> Cursor for RegionCursorMut<'a, P, C, D> {
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
