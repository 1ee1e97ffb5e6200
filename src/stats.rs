//! Encoding statistics and the textual self-description of a volume.

use serde::Serialize;
use std::fmt;

/// Footprint report for the buffered region of an [`RleImage`]
/// (see [`RleImage::stats`]).
///
/// `compressed_bytes` counts the run segments plus the per-line bookkeeping;
/// `dense_bytes` is the baseline a dense container of the same pixel type
/// would use. A ratio above 1.0 means the encoding is counterproductive for
/// this content.
///
/// [`RleImage`]: crate::image::RleImage
/// [`RleImage::stats`]: crate::image::RleImage::stats
#[derive(Clone, Copy, Debug, Serialize)]
pub struct VolumeStats {
    /// Buffered scanlines.
    pub line_count: usize,
    /// Run segments across all buffered scanlines.
    pub segment_count: usize,
    /// Compressed footprint in bytes.
    pub compressed_bytes: usize,
    /// Dense baseline in bytes.
    pub dense_bytes: usize,
    /// `compressed_bytes / dense_bytes` (0 when the volume is empty).
    pub compression_ratio: f64,
    /// Whether writes restore canonical form on the fly.
    pub on_the_fly_cleanup: bool,
}

impl VolumeStats {
    /// Pretty-printed JSON, for tooling that collects diagnostics.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize stats: {e}"))
    }
}

impl fmt::Display for VolumeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lines: {}", self.line_count)?;
        writeln!(f, "segments: {}", self.segment_count)?;
        writeln!(
            f,
            "compressed: {} B ({:.1}% of {} B dense)",
            self.compressed_bytes,
            self.compression_ratio * 100.0,
            self.dense_bytes
        )?;
        write!(
            f,
            "on-the-fly cleanup: {}",
            if self.on_the_fly_cleanup { "on" } else { "off" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VolumeStats {
        VolumeStats {
            line_count: 16,
            segment_count: 48,
            compressed_bytes: 576,
            dense_bytes: 4096,
            compression_ratio: 576.0 / 4096.0,
            on_the_fly_cleanup: true,
        }
    }

    #[test]
    fn display_reports_ratio_and_flag() {
        let text = sample().to_string();
        assert!(text.contains("segments: 48"), "got: {text}");
        assert!(text.contains("14.1%"), "got: {text}");
        assert!(text.contains("cleanup: on"), "got: {text}");
    }

    #[test]
    fn json_round_trips_field_names() {
        let json = sample().to_json().expect("stats serialize");
        assert!(json.contains("\"segment_count\": 48"), "got: {json}");
        assert!(json.contains("\"on_the_fly_cleanup\": true"), "got: {json}");
    }
}
