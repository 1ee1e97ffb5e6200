mod common;

use common::labels::{label_at, rle_from_fn};
use rle_image::{Region, RleError, RleImage, Segment};

fn runs(img: &RleImage<u8, u16, 2>, index: [i64; 2]) -> Vec<(usize, u8)> {
    img.line_at(index)
        .segments()
        .iter()
        .map(|s| (s.run(), s.value))
        .collect()
}

#[test]
fn allocate_initialises_single_run_lines() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([7, 3]));
    img.allocate().expect("well-formed region");
    for y in 0..3 {
        assert_eq!(runs(&img, [0, y]), vec![(7, 0)]);
    }
}

#[test]
fn fill_reencodes_fragmented_lines() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([6, 2]));
    img.allocate().expect("well-formed region");
    img.set_pixel([2, 0], 5).expect("buffered index");
    img.set_pixel([4, 1], 6).expect("buffered index");
    img.fill(9);
    for y in 0..2 {
        assert_eq!(runs(&img, [0, y]), vec![(6, 9)]);
    }
}

#[test]
fn set_pixel_splits_and_merges() {
    // S1 and S2 through the container's slow path.
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([5, 1]));
    img.allocate().expect("well-formed region");
    img.fill(b'A');

    img.set_pixel([2, 0], b'B').expect("buffered index");
    assert_eq!(runs(&img, [0, 0]), vec![(2, b'A'), (1, b'B'), (2, b'A')]);

    img.set_pixel([2, 0], b'A').expect("buffered index");
    assert_eq!(runs(&img, [0, 0]), vec![(5, b'A')]);
}

#[test]
fn pixel_accessors_agree_with_reference_pattern() {
    let region = Region::sized([9, 4, 3]);
    let img = rle_from_fn(region, label_at);
    for z in 0..3 {
        for y in 0..4 {
            for x in 0..9 {
                assert_eq!(
                    img.get_pixel([x, y, z]),
                    Ok(label_at([x, y, z])),
                    "mismatch at ({x}, {y}, {z})"
                );
            }
        }
    }
}

#[test]
fn accessors_reject_incomplete_scanlines() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([8, 2]));
    img.allocate().expect("well-formed region");
    img.set_buffered_region(Region::sized([4, 2]));
    let get_err: Result<u8, RleError> = Err(RleError::GeometryViolation {
        buffered: 4,
        largest: 8,
    });
    let set_err: Result<(), RleError> = Err(RleError::GeometryViolation {
        buffered: 4,
        largest: 8,
    });
    assert_eq!(img.get_pixel([1, 0]), get_err);
    assert_eq!(img.set_pixel([1, 0], 1), set_err);
}

#[test]
fn cleanup_flag_defers_and_restores_canonical_form() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([8, 1]));
    img.allocate().expect("well-formed region");
    img.set_on_the_fly_cleanup(false);
    assert!(!img.on_the_fly_cleanup());

    // Scattered same-value writes fragment the line while cleanup is off:
    // the final write leaves three adjacent single-pixel runs of 1.
    for x in [2, 4, 3] {
        img.set_pixel([x, 0], 1).expect("buffered index");
    }
    let line = img.line_at([0, 0]);
    assert_eq!(line.len(), 5, "expected fragmentation, got {} runs", line.len());
    let total: usize = line.segments().iter().map(Segment::run).sum();
    assert_eq!(total, 8, "run lengths must still sum to the extent");

    // Turning the flag back on re-canonicalises the whole volume.
    img.set_on_the_fly_cleanup(true);
    assert_eq!(runs(&img, [0, 0]), vec![(2, 0), (3, 1), (3, 0)]);
}

#[test]
fn clean_is_idempotent_at_volume_scope() {
    let region = Region::sized([9, 4, 3]);
    let mut img = rle_from_fn(region, label_at);
    let before: Vec<Vec<u8>> = (0..4)
        .flat_map(|y| (0..3).map(move |z| (y, z)))
        .map(|(y, z)| img.line_at([0, y, z]).expand())
        .collect();
    img.clean();
    img.clean();
    let after: Vec<Vec<u8>> = (0..4)
        .flat_map(|y| (0..3).map(move |z| (y, z)))
        .map(|(y, z)| img.line_at([0, y, z]).expand())
        .collect();
    assert_eq!(before, after, "clean must not change the dense expansion");
}

#[test]
fn canonical_invariants_hold_after_editing() {
    let region = Region::sized([9, 4, 3]);
    let img = rle_from_fn(region, label_at);
    for z in 0..3 {
        for y in 0..4 {
            let line = img.line_at([0, y, z]);
            let total: usize = line.segments().iter().map(Segment::run).sum();
            assert_eq!(total, 9, "length invariant violated at y={y} z={z}");
            assert!(line.segments().iter().all(|s| s.run() >= 1));
            for w in line.segments().windows(2) {
                assert_ne!(
                    w[0].value, w[1].value,
                    "canonical form violated at y={y} z={z}"
                );
            }
        }
    }
}

#[test]
fn stats_report_encoding_and_flag() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::sized([16, 4]));
    img.allocate().expect("well-formed region");
    img.set_pixel([8, 0], 1).expect("buffered index");

    let stats = img.stats();
    assert_eq!(stats.line_count, 4);
    assert_eq!(stats.segment_count, 3 + 3, "one split line, three whole lines");
    assert!(stats.on_the_fly_cleanup);
    assert!(stats.compressed_bytes > 0 && stats.dense_bytes == 16 * 4);
    assert!(stats.compression_ratio > 0.0);

    let text = stats.to_string();
    assert!(text.contains("lines: 4"), "got: {text}");
    let json = stats.to_json().expect("stats serialize");
    assert!(json.contains("\"line_count\": 4"), "got: {json}");
}

#[test]
fn non_zero_region_indices_are_respected() {
    let mut img = RleImage::<u8, u16, 2>::new();
    img.set_regions(Region::new([10, -2], [6, 4]));
    img.allocate().expect("well-formed region");
    img.set_pixel([12, -1], 7).expect("buffered index");
    assert_eq!(img.get_pixel([12, -1]), Ok(7));
    assert_eq!(img.get_pixel([12, 0]), Ok(0));
    assert_eq!(runs(&img, [10, -1]), vec![(2, 0), (1, 7), (3, 0)]);
}
