#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cursor;
pub mod error;
pub mod image;
pub mod line;
pub mod region;
pub mod roi;
pub mod stats;

// Geometry is carried through conversions unchanged; public for hosts that
// own the physical-space bookkeeping.
pub mod geometry;

// --- High-level re-exports -------------------------------------------------

// The containers and their value-type contracts.
pub use crate::image::{DenseImage, RleImage};
pub use crate::line::{Line, LinePos, PixelValue, RunCounter, Segment};
pub use crate::region::Region;

// Traversal.
pub use crate::cursor::{
    Cursor, IndexedCursor, IndexedCursorMut, RegionCursor, RegionCursorMut, ScanlineCursor,
    ScanlineCursorMut,
};

// Extraction and conversion.
pub use crate::roi::{DenseToRleFilter, RleRoiFilter, RleToDenseFilter};

pub use crate::error::RleError;
pub use crate::geometry::Geometry;
pub use crate::stats::VolumeStats;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use rle_image::prelude::*;
///
/// # fn main() -> Result<(), RleError> {
/// let mut labels: RleImage<u8, u16, 2> = RleImage::new();
/// labels.set_regions(Region::sized([128, 128]));
/// labels.allocate()?;
/// labels.fill(3);
///
/// let region = *labels.buffered_region();
/// let mut cur = RegionCursor::new(&labels, region)?;
/// let mut count = 0usize;
/// while !cur.is_at_end() {
///     if cur.get() == 3 {
///         count += 1;
///     }
///     cur.next();
/// }
/// assert_eq!(count, 128 * 128);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::cursor::{
        Cursor, IndexedCursor, IndexedCursorMut, RegionCursor, RegionCursorMut, ScanlineCursor,
        ScanlineCursorMut,
    };
    pub use crate::error::RleError;
    pub use crate::image::{DenseImage, RleImage};
    pub use crate::region::Region;
    pub use crate::roi::{DenseToRleFilter, RleRoiFilter, RleToDenseFilter};
}
