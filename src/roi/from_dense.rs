//! Dense → RLE conversion with region-of-interest extraction.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::roi_geometry;
use crate::error::RleError;
use crate::image::grid::GridCursor;
use crate::image::{DenseImage, RleImage};
use crate::line::{Line, PixelValue, RunCounter};
use crate::region::Region;

/// Run-length encodes a rectangular sub-volume of a dense image.
///
/// Each output scanline is accumulated in one pass over the matching dense
/// row; the result is canonical by construction.
#[derive(Clone, Copy, Debug)]
pub struct DenseToRleFilter<const D: usize = 3> {
    roi: Region<D>,
}

impl<const D: usize> DenseToRleFilter<D> {
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
        input: &DenseImage<P, D>,
        output: &mut RleImage<P, C, D>,
    ) where
        P: PixelValue,
        C: RunCounter,
    {
        output.set_largest_possible_region(Region::sized(self.roi.size));
        output.set_geometry(roi_geometry(input.geometry(), &self.roi));
    }

    /// Pipeline hook: demand the region of interest from the input.
    pub fn generate_input_requested_region<P: PixelValue>(&self, input: &mut DenseImage<P, D>) {
        input.set_requested_region(self.roi);
    }

    /// Pipeline hook: force full production (run lists are written whole).
    pub fn enlarge_output_requested_region<P: PixelValue, C: RunCounter>(
        &self,
        output: &mut RleImage<P, C, D>,
    ) {
        output.set_requested_region(*output.largest_possible_region());
    }

    /// Per-tile worker with the one-writer-per-line guard; see
    /// [`RleRoiFilter::generate_tile`](super::RleRoiFilter::generate_tile).
    pub fn generate_tile<P, C>(
        &self,
        input: &DenseImage<P, D>,
        output: &mut RleImage<P, C, D>,
        tile: Region<D>,
    ) -> Result<(), RleError>
    where
        P: PixelValue,
        C: RunCounter,
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
        let x0 = (self.roi.index[0] + tile.index[0] - input.region().index[0]) as usize;
        let width = tile.size[0];
        let out_buffered = *output.buffered_region();
        let mut grid = GridCursor::new(out_buffered, tile);
        while !grid.is_at_end() {
            let offset = grid.offset();
            let row = input.row(self.input_index(grid.index()));
            output.lines_mut()[offset] = Line::from_dense_row(&row[x0..x0 + width]);
            grid.next();
        }
        Ok(())
    }

    /// Run the whole filter; production is parallel per scanline when the
    /// `parallel` feature is enabled.
    pub fn update<P, C>(&self, input: &DenseImage<P, D>) -> Result<RleImage<P, C, D>, RleError>
    where
        P: PixelValue,
        C: RunCounter,
    {
        if self.roi.num_pixels() > 0 && !input.region().contains(&self.roi) {
            return Err(RleError::RegionNotBuffered);
        }
        let mut output = RleImage::new();
        self.generate_output_information(input, &mut output);
        output.set_buffered_region(*output.largest_possible_region());
        self.enlarge_output_requested_region(&mut output);
        output.allocate()?;
        if self.roi.num_pixels() == 0 {
            return Ok(output);
        }
        debug!(
            "DenseToRleFilter::update encoding {:?}+{:?} as {} lines",
            self.roi.index,
            self.roi.size,
            output.lines().len()
        );

        #[cfg(feature = "parallel")]
        {
            let x0 = (self.roi.index[0] - input.region().index[0]) as usize;
            let width = self.roi.size[0];
            let out_buffered = *output.buffered_region();
            output
                .lines_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(|(offset, line)| {
                    let out_index = out_buffered.grid_index_at(offset);
                    let row = input.row(self.input_index(out_index));
                    *line = Line::from_dense_row(&row[x0..x0 + width]);
                });
        }
        #[cfg(not(feature = "parallel"))]
        {
            let requested = *output.requested_region();
            self.generate_tile(input, &mut output, requested)?;
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
