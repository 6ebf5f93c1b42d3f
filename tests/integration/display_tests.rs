//! End-to-end display of slices pulled from a real Zarr store.
//!
//! Tests verify:
//! - Default slice display and min-max normalization
//! - Resize targets applied after rasterization
//! - Under-pinned slices and oversized planes are rejected
//! - PNG output round-trips through the image decoder

use bia_explorer::{
    display_slice, write_png, DisplayOptions, LazyArray, RenderError, SliceSpec,
};

use super::test_utils::create_ngff_store;

fn open_fixture(dir: &tempfile::TempDir) -> LazyArray {
    LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap()
}

// =============================================================================
// Rasterization
// =============================================================================

#[test]
fn test_default_display_normalizes_to_full_range() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let raster = display_slice(&array, None, &DisplayOptions::default()).unwrap();

    // The fixture plane is an 8x16 gradient, so the extremes map to the
    // ends of the 8-bit range.
    assert_eq!(raster.dimensions(), (16, 8));
    assert_eq!(raster.get_pixel(0, 0).0[0], 0);
    assert_eq!(raster.get_pixel(15, 7).0[0], 255);
}

#[test]
fn test_explicit_slice_selects_plane() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let spec = SliceSpec {
        c: Some(1),
        z: Some(2),
        t: Some(0),
        ..Default::default()
    };
    let raster = display_slice(&array, Some(&spec), &DisplayOptions::default()).unwrap();

    assert_eq!(raster.dimensions(), (16, 8));
}

// =============================================================================
// Resizing
// =============================================================================

#[test]
fn test_target_height_preserves_aspect_ratio() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let options = DisplayOptions {
        target_height: Some(4),
        ..Default::default()
    };
    let raster = display_slice(&array, None, &options).unwrap();

    // 16x8 halved along y keeps the 2:1 aspect ratio.
    assert_eq!(raster.dimensions(), (8, 4));
}

#[test]
fn test_both_targets_resize_exactly() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let options = DisplayOptions {
        target_height: Some(5),
        target_width: Some(3),
        ..Default::default()
    };
    let raster = display_slice(&array, None, &options).unwrap();

    assert_eq!(raster.dimensions(), (3, 5));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_under_pinned_slice_is_not_a_plane() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    // Only the channel is pinned, so the materialized block has four axes.
    let spec = SliceSpec {
        c: Some(0),
        ..Default::default()
    };
    match display_slice(&array, Some(&spec), &DisplayOptions::default()) {
        Err(RenderError::NotAPlane { shape }) => assert_eq!(shape, vec![3, 1, 8, 16]),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("non-planar slice was displayed"),
    }
}

#[test]
fn test_plane_over_ceiling_is_rejected() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let options = DisplayOptions {
        max_plane_dim: 10,
        ..Default::default()
    };
    match display_slice(&array, None, &options) {
        Err(RenderError::PlaneTooLarge {
            height,
            width,
            limit,
        }) => {
            assert_eq!((height, width, limit), (8, 16, 10));
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("oversized plane was displayed"),
    }
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_png_output_round_trips() {
    let dir = create_ngff_store();
    let array = open_fixture(&dir);

    let raster = display_slice(&array, None, &DisplayOptions::default()).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("slice.png");
    write_png(&raster, &path).unwrap();

    let decoded = image::open(&path).unwrap().into_luma8();
    assert_eq!(decoded.dimensions(), (16, 8));
    assert_eq!(decoded.get_pixel(15, 7).0[0], 255);
}
