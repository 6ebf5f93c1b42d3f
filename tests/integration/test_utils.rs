//! Shared fixtures for integration tests.
//!
//! The Zarr fixture writes a real OME-NGFF-shaped store to a temporary
//! directory: a 5-D uint16 array laid out (c, z, t, y, x) and filled with
//! a gradient so that every element value encodes its own coordinates.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use zarrs::array::{data_type, ArrayBuilder, ArraySubset};
use zarrs::filesystem::FilesystemStore;

use bia_explorer::{ImageRepresentation, RepresentationFormat};

/// Fixture array shape, (c, z, t, y, x).
pub const TEST_SHAPE: [u64; 5] = [2, 3, 1, 8, 16];

/// Write the gradient fixture to a fresh temporary directory.
///
/// The returned guard owns the directory; the store lives at its root with
/// the image array under `/0`.
pub fn create_ngff_store() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_gradient_array(dir.path());
    dir
}

/// An OME-NGFF representation pointing at a local store root.
pub fn local_representation(root: &Path) -> ImageRepresentation {
    ImageRepresentation {
        uri: vec![format!("file://{}", root.display())],
        format: Some(RepresentationFormat::OmeNgff),
        size: 0,
        dimensions: Some(format!("{:?}", TEST_SHAPE)),
    }
}

/// The value stored at (c, z, t, y, x): the element's flat index.
pub fn expected_value(c: u64, z: u64, t: u64, y: u64, x: u64) -> f32 {
    let [_, nz, nt, ny, nx] = TEST_SHAPE;
    ((((c * nz + z) * nt + t) * ny + y) * nx + x) as f32
}

fn write_gradient_array(root: &Path) {
    let store = Arc::new(FilesystemStore::new(root).unwrap());
    let array = ArrayBuilder::new(
        TEST_SHAPE.to_vec(),
        vec![1, 1, 1, 4, 8],
        data_type::uint16(),
        0u16,
    )
    .build(store, "/0")
    .unwrap();
    array.store_metadata().unwrap();

    let total: u64 = TEST_SHAPE.iter().product();
    let data: Vec<u16> = (0..total).map(|i| i as u16).collect();
    let subset = ArraySubset::new_with_ranges(&[0..2, 0..3, 0..1, 0..8, 0..16]);
    array
        .store_array_subset_elements::<u16>(&subset, &data)
        .unwrap();
}
