//! RLE → RLE region-of-interest extraction.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::roi_geometry;
use crate::error::RleError;
use crate::image::grid::GridCursor;
use crate::image::RleImage;
use crate::line::{Line, PixelValue, RunCounter};
use crate::region::Region;

/// Extracts a rectangular sub-volume of an RLE image into a new, zero-based
/// RLE image, optionally re-coding the pixel type (`POut: From<PIn>`) and the
/// run counter type.
///
/// The output is produced line by line from the input's run lists; no dense
/// intermediate exists, and a canonical input yields a canonical output.
#[derive(Clone, Copy, Debug)]
pub struct RleRoiFilter<const D: usize = 3> {
    roi: Region<D>,
}

impl<const D: usize> RleRoiFilter<D> {
    pub fn new(roi: Region<D>) -> Self {
        Self { roi }
    }

    #[inline]
    pub fn region_of_interest(&self) -> &Region<D> {
        &self.roi
    }

    /// Pipeline hook: size the output's largest possible region to the RoI
    /// (zero-based) and translate the RoI start into the output origin.
    pub fn generate_output_information<PIn, POut, CIn, COut>(
        &self,
        input: &RleImage<PIn, CIn, D>,
        output: &mut RleImage<POut, COut, D>,
    ) where
        PIn: PixelValue,
        POut: PixelValue,
        CIn: RunCounter,
        COut: RunCounter,
    {
        output.set_largest_possible_region(Region::sized(self.roi.size));
        output.set_geometry(roi_geometry(input.geometry(), &self.roi));
    }

    /// Pipeline hook: demand the region of interest from the input.
    pub fn generate_input_requested_region<P: PixelValue, C: RunCounter>(
        &self,
        input: &mut RleImage<P, C, D>,
    ) {
        input.set_requested_region(self.roi);
    }

    /// Pipeline hook: force full production. Run lists are written whole, so
    /// partial axis-0 production would leave lines half-built under
    /// concurrent writers.
    pub fn enlarge_output_requested_region<P: PixelValue, C: RunCounter>(
        &self,
        output: &mut RleImage<P, C, D>,
    ) {
        output.set_requested_region(*output.largest_possible_region());
    }

    /// Per-tile worker. A tile whose axis-0 start differs from the output's
    /// requested axis-0 start returns immediately: the tile that does start
    /// there produces those scanlines whole. This is what keeps every line
    /// under exactly one writer.
    pub fn generate_tile<PIn, POut, CIn, COut>(
        &self,
        input: &RleImage<PIn, CIn, D>,
        output: &mut RleImage<POut, COut, D>,
        tile: Region<D>,
    ) -> Result<(), RleError>
    where
        PIn: PixelValue,
        POut: PixelValue + From<PIn>,
        CIn: RunCounter,
        COut: RunCounter,
    {
        let requested = *output.requested_region();
        if tile.index[0] != requested.index[0] {
            return Ok(()); // another tile produces these lines
        }
        let mut tile = tile;
        tile.size[0] = requested.size[0];
        if tile.num_pixels() == 0 {
            return Ok(());
        }
        let start = (self.roi.index[0] + tile.index[0] - input.buffered_region().index[0]) as usize;
        let end = start + tile.size[0];
        let out_buffered = *output.buffered_region();
        let mut grid = GridCursor::new(out_buffered, tile);
        while !grid.is_at_end() {
            let offset = grid.offset();
            let line = self.extract_line(input, grid.index(), start, end)?;
            output.lines_mut()[offset] = line;
            grid.next();
        }
        Ok(())
    }

    /// Run the whole filter: information, allocation, production. Production
    /// is parallel per scanline when the `parallel` feature is enabled.
    pub fn update<PIn, POut, CIn, COut>(
        &self,
        input: &RleImage<PIn, CIn, D>,
    ) -> Result<RleImage<POut, COut, D>, RleError>
    where
        PIn: PixelValue,
        POut: PixelValue + From<PIn>,
        CIn: RunCounter,
        COut: RunCounter,
    {
        check_rle_input(input, &self.roi)?;
        let mut output = RleImage::new();
        self.generate_output_information(input, &mut output);
        output.set_buffered_region(*output.largest_possible_region());
        self.enlarge_output_requested_region(&mut output);
        output.allocate()?;
        if self.roi.num_pixels() == 0 {
            return Ok(output);
        }
        debug!(
            "RleRoiFilter::update extracting {:?}+{:?} as {} lines",
            self.roi.index,
            self.roi.size,
            output.lines().len()
        );

        #[cfg(feature = "parallel")]
        {
            let start = (self.roi.index[0] - input.buffered_region().index[0]) as usize;
            let end = start + self.roi.size[0];
            let out_buffered = *output.buffered_region();
            output
                .lines_mut()
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(offset, line)| {
                    let out_index = out_buffered.grid_index_at(offset);
                    *line = self.extract_line(input, out_index, start, end)?;
                    Ok(())
                })?;
        }
        #[cfg(not(feature = "parallel"))]
        {
            let requested = *output.requested_region();
            self.generate_tile(input, &mut output, requested)?;
        }
        Ok(output)
    }

    /// One output line: the matching input line restricted to
    /// `[start, end)` (offsets relative to the input line start) and
    /// re-coded.
    fn extract_line<PIn, POut, CIn, COut>(
        &self,
        input: &RleImage<PIn, CIn, D>,
        out_index: [i64; D],
        start: usize,
        end: usize,
    ) -> Result<Line<POut, COut>, RleError>
    where
        PIn: PixelValue,
        POut: PixelValue + From<PIn>,
        CIn: RunCounter,
        COut: RunCounter,
    {
        let mut in_index = out_index;
        for axis in 1..D {
            in_index[axis] += self.roi.index[axis];
        }
        let in_line = &input.lines()[input.buffered_region().grid_offset(in_index)];
        in_line.extract(start, end).ok_or(RleError::OutOfLineWalk)
    }
}

/// Shared input validation: the RoI must be buffered, lines must be complete
/// and allocated.
pub(crate) fn check_rle_input<P, C, const D: usize>(
    input: &RleImage<P, C, D>,
    roi: &Region<D>,
) -> Result<(), RleError>
where
    P: PixelValue,
    C: RunCounter,
{
    let buffered = input.buffered_region();
    let largest = input.largest_possible_region();
    if buffered.size[0] != largest.size[0] {
        return Err(RleError::GeometryViolation {
            buffered: buffered.size[0],
            largest: largest.size[0],
        });
    }
    if roi.num_pixels() > 0 && !buffered.contains(roi) {
        return Err(RleError::RegionNotBuffered);
    }
    if input.lines().len() != buffered.grid_len() {
        return Err(RleError::RegionNotBuffered);
    }
    Ok(())
}
