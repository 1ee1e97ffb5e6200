use rle_image::{DenseImage, Region, RleImage};

/// Deterministic label pattern with short runs along axis 0.
pub fn label_at(index: [i64; 3]) -> u8 {
    ((index[0] / 3) + index[1] + 2 * index[2]).rem_euclid(5) as u8
}

/// Dense volume filled from `f` over `region`.
pub fn dense_from_fn(region: Region<3>, f: impl Fn([i64; 3]) -> u8) -> DenseImage<u8, 3> {
    let mut img = DenseImage::new(region, 0);
    for z in region.index[2]..region.end(2) {
        for y in region.index[1]..region.end(1) {
            for x in region.index[0]..region.end(0) {
                img.set([x, y, z], f([x, y, z]));
            }
        }
    }
    img
}

/// RLE volume filled from `f` over `region` through the slow per-pixel path,
/// independent of the conversion filters under test.
pub fn rle_from_fn(region: Region<3>, f: impl Fn([i64; 3]) -> u8) -> RleImage<u8, u16, 3> {
    let mut img = RleImage::new();
    img.set_regions(region);
    img.allocate().expect("region is well formed");
    for z in region.index[2]..region.end(2) {
        for y in region.index[1]..region.end(1) {
            for x in region.index[0]..region.end(0) {
                img.set_pixel([x, y, z], f([x, y, z]))
                    .expect("index is buffered");
            }
        }
    }
    img
}

/// Row-major (axis 0 fastest) expansion of `f` over `region`, the order every
/// forward cursor walks.
pub fn expected_row_major(region: Region<3>, f: impl Fn([i64; 3]) -> u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(region.num_pixels());
    for z in region.index[2]..region.end(2) {
        for y in region.index[1]..region.end(1) {
            for x in region.index[0]..region.end(0) {
                out.push(f([x, y, z]));
            }
        }
    }
    out
}
