use thiserror::Error;

/// Errors surfaced by the container and the conversion filters.
///
/// All of these are preconditional except [`RleError::OutOfLineWalk`], which
/// reports a corrupted run list and is not recoverable. Nothing is retried
/// internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RleError {
    /// The buffered region does not span the full axis-0 extent. Every
    /// buffered scanline must be complete.
    #[error(
        "buffered region spans {buffered} of {largest} pixels along axis 0; \
         complete scanlines must be buffered"
    )]
    GeometryViolation { buffered: usize, largest: usize },

    /// The axis-0 extent does not fit in the run counter type.
    #[error("axis-0 extent {extent} exceeds the run counter maximum {max}")]
    CounterOverflow { extent: usize, max: u64 },

    /// A walk along a scanline ran past its last segment without reaching the
    /// requested axis-0 position. The run list no longer sums to the buffered
    /// extent.
    #[error("walked past the end of a run-length line")]
    OutOfLineWalk,

    /// A walk region (cursor region or region of interest) is not contained
    /// in the buffered region.
    #[error("requested region is not contained in the buffered region")]
    RegionNotBuffered,
}
