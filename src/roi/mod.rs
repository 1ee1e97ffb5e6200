//! Region-of-interest extraction and dense ↔ RLE conversion filters.
//!
//! Three filter shapes share one skeleton:
//! - [`RleRoiFilter`]: RLE → RLE, optionally re-coding pixel and counter
//!   types on the way.
//! - [`DenseToRleFilter`]: dense → RLE run accumulation.
//! - [`RleToDenseFilter`]: RLE → dense expansion.
//!
//! Each filter exposes the pipeline hooks a host framework drives
//! (`generate_output_information`, `generate_input_requested_region`,
//! `enlarge_output_requested_region`, `generate_tile`) plus a self-driving
//! `update` for standalone use. Input and output always share the dimension
//! parameter, so mismatched-dimension pairs do not exist at the type level.
//!
//! Concurrency rests on a single rule: at most one task ever writes a given
//! output scanline. For RLE outputs that means a tile must cover whole
//! scanlines; `generate_tile` enforces it by ignoring tiles that do not start
//! at the requested region's axis-0 start and widening the one that does.
//! Dense output rows have no such constraint and split freely.

mod from_dense;
mod rle;
mod to_dense;

pub use from_dense::DenseToRleFilter;
pub use rle::RleRoiFilter;
pub use to_dense::RleToDenseFilter;

use crate::geometry::Geometry;
use crate::region::Region;

/// Output geometry of an extraction: the region of interest's starting index
/// becomes the new origin in physical space; spacing and direction carry
/// through unchanged.
pub(crate) fn roi_geometry<const D: usize>(input: &Geometry<D>, roi: &Region<D>) -> Geometry<D> {
    let mut geometry = input.clone();
    geometry.origin = input.index_to_physical_point(roi.index);
    geometry
}
