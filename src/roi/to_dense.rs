//! RLE → dense expansion with region-of-interest extraction.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::rle::check_rle_input;
use super::roi_geometry;
use crate::error::RleError;
use crate::image::grid::GridCursor;
use crate::image::{DenseImage, RleImage};
use crate::line::{PixelValue, RunCounter};
use crate::region::Region;

/// Expands a rectangular sub-volume of an RLE image into a dense image.
///
/// Unlike the RLE-producing filters this one needs no one-writer-per-line
/// guard: dense rows are plain pixel slices and split freely between tasks.
#[derive(Clone, Copy, Debug)]
pub struct RleToDenseFilter<const D: usize = 3> {
    roi: Region<D>,
}

impl<const D: usize> RleToDenseFilter<D> {
    pub fn new(roi: Region<D>) -> Self {
        Self { roi }
    }

    #[inline]
    pub fn region_of_interest(&self) -> &Region<D> {
        &self.roi
    }

    /// Pipeline hook: size the output to the RoI and translate its start
    /// into the output origin.
    pub fn generate_output_information<P, C>(
        &self,
        input: &RleImage<P, C, D>,
        output: &mut DenseImage<P, D>,
    ) where
        P: PixelValue,
        C: RunCounter,
    {
        output.set_geometry(roi_geometry(input.geometry(), &self.roi));
    }

    /// Pipeline hook: demand the region of interest from the input.
    pub fn generate_input_requested_region<P: PixelValue, C: RunCounter>(
        &self,
        input: &mut RleImage<P, C, D>,
    ) {
        input.set_requested_region(self.roi);
    }

    /// Per-tile worker. Dense rows split freely, so the tile is honoured
    /// exactly as given (no axis-0 widening).
    pub fn generate_tile<P, C>(
        &self,
        input: &RleImage<P, C, D>,
        output: &mut DenseImage<P, D>,
        tile: Region<D>,
    ) -> Result<(), RleError>
    where
        P: PixelValue,
        C: RunCounter,
    {
        if tile.num_pixels() == 0 {
            return Ok(());
        }
        let out_region = *output.region();
        let start =
            (self.roi.index[0] + tile.index[0] - input.buffered_region().index[0]) as usize;
        let row_skip = (tile.index[0] - out_region.index[0]) as usize;
        let in_buffered = *input.buffered_region();
        let mut grid = GridCursor::new(out_region, tile);
        while !grid.is_at_end() {
            let out_index = grid.index();
            let in_line = &input.lines()[in_buffered.grid_offset(self.input_index(out_index))];
            let row = &mut output.row_mut(out_index)[row_skip..row_skip + tile.size[0]];
            in_line
                .expand_into(start, row)
                .ok_or(RleError::OutOfLineWalk)?;
            grid.next();
        }
        Ok(())
    }

    /// Run the whole filter; expansion is parallel per row when the
    /// `parallel` feature is enabled.
    pub fn update<P, C>(&self, input: &RleImage<P, C, D>) -> Result<DenseImage<P, D>, RleError>
    where
        P: PixelValue,
        C: RunCounter,
    {
        check_rle_input(input, &self.roi)?;
        let mut output = DenseImage::new(Region::sized(self.roi.size), P::default());
        self.generate_output_information(input, &mut output);
        if self.roi.num_pixels() == 0 {
            return Ok(output);
        }
        debug!(
            "RleToDenseFilter::update expanding {:?}+{:?} into {} pixels",
            self.roi.index,
            self.roi.size,
            output.region().num_pixels()
        );

        let start = (self.roi.index[0] - input.buffered_region().index[0]) as usize;
        let out_region = *output.region();
        let in_buffered = *input.buffered_region();
        #[cfg(feature = "parallel")]
        {
            output
                .data_mut()
                .par_chunks_mut(self.roi.size[0])
                .enumerate()
                .try_for_each(|(offset, row)| {
                    let out_index = out_region.grid_index_at(offset);
                    let in_line =
                        &input.lines()[in_buffered.grid_offset(self.input_index(out_index))];
                    in_line
                        .expand_into(start, row)
                        .ok_or(RleError::OutOfLineWalk)
                })?;
        }
        #[cfg(not(feature = "parallel"))]
        {
            for offset in 0..out_region.grid_len() {
                let out_index = out_region.grid_index_at(offset);
                let in_line =
                    &input.lines()[in_buffered.grid_offset(self.input_index(out_index))];
                in_line
                    .expand_into(start, output.row_mut(out_index))
                    .ok_or(RleError::OutOfLineWalk)?;
            }
        }
        Ok(output)
    }

    /// Input grid index of the zero-based output grid index.
    fn input_index(&self, out_index: [i64; D]) -> [i64; D] {
        let mut in_index = out_index;
        for axis in 1..D {
            in_index[axis] += self.roi.index[axis];
        }
        in_index
    }
}
