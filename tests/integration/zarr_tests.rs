//! Slice materialization against a real on-disk Zarr store.
//!
//! Tests verify:
//! - Opening a store through the representation format tag
//! - Plane extraction with every (c, z, t) coordinate pinned
//! - Partially pinned and unpinned fetches keep the free axes
//! - Out-of-bounds coordinates are rejected with axis context

use bia_explorer::{ArrayError, LazyArray, SliceSpec};

use super::test_utils::{create_ngff_store, expected_value, local_representation, TEST_SHAPE};

// =============================================================================
// Opening
// =============================================================================

#[test]
fn test_open_local_store_through_representation() {
    let dir = create_ngff_store();
    let representation = local_representation(dir.path());

    let array = LazyArray::open(&representation).unwrap();

    assert_eq!(array.shape(), &TEST_SHAPE);
    assert_eq!(array.data_type_name(), "uint16");
}

#[test]
fn test_open_plain_path_without_scheme() {
    let dir = create_ngff_store();
    let uri = dir.path().display().to_string();

    let array = LazyArray::open_ngff_uri(&uri).unwrap();

    assert_eq!(array.shape(), &TEST_SHAPE);
}

// =============================================================================
// Plane Extraction
// =============================================================================

#[test]
fn test_fully_pinned_slice_yields_yx_plane() {
    let dir = create_ngff_store();
    let array = LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap();

    let spec = SliceSpec {
        c: Some(1),
        z: Some(2),
        t: Some(0),
        ..Default::default()
    };
    let plane = array.fetch_plane(&spec).unwrap();

    assert_eq!(plane.shape(), &[8, 16]);
    for y in 0..8u64 {
        for x in 0..16u64 {
            assert_eq!(
                plane[[y as usize, x as usize]],
                expected_value(1, 2, 0, y, x),
                "mismatch at y={y} x={x}"
            );
        }
    }
}

#[test]
fn test_default_slice_is_first_plane() {
    let dir = create_ngff_store();
    let array = LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap();

    let plane = array.fetch_plane(&SliceSpec::first_plane()).unwrap();

    assert_eq!(plane.shape(), &[8, 16]);
    assert_eq!(plane[[0, 0]], expected_value(0, 0, 0, 0, 0));
    assert_eq!(plane[[7, 15]], expected_value(0, 0, 0, 7, 15));
}

#[test]
fn test_partial_pin_keeps_free_axes() {
    let dir = create_ngff_store();
    let array = LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap();

    // Only the channel is pinned; z and t stay free.
    let spec = SliceSpec {
        c: Some(1),
        ..Default::default()
    };
    let block = array.fetch_plane(&spec).unwrap();

    assert_eq!(block.shape(), &[3, 1, 8, 16]);
    assert_eq!(block[[2, 0, 4, 9]], expected_value(1, 2, 0, 4, 9));
}

#[test]
fn test_empty_slice_fetches_whole_array() {
    let dir = create_ngff_store();
    let array = LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap();

    let block = array.fetch_plane(&SliceSpec::default()).unwrap();

    assert_eq!(block.shape(), &[2, 3, 1, 8, 16]);
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn test_out_of_bounds_coordinate_is_rejected() {
    let dir = create_ngff_store();
    let array = LazyArray::open_ngff_uri(&dir.path().display().to_string()).unwrap();

    let spec = SliceSpec {
        z: Some(3),
        ..Default::default()
    };
    match array.fetch_plane(&spec) {
        Err(ArrayError::IndexOutOfBounds { axis, index, size }) => {
            assert_eq!(axis, 1);
            assert_eq!(index, 3);
            assert_eq!(size, 3);
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("out-of-bounds coordinate was accepted"),
    }
}
