//! Lazy materialization of image representation arrays.
//!
//! An OME-NGFF representation points at a Zarr store holding a pyramid of
//! chunked N-D arrays; the full-resolution array lives at the conventional
//! top-level path `/0`. [`LazyArray::open`] dispatches on the declared
//! format tag, opens the store for the primary URI in read mode, and reads
//! array metadata only. Chunk data crosses the network exactly once, inside
//! [`LazyArray::fetch_plane`].
//!
//! Every open call constructs a fresh store; nothing is cached across
//! calls.

pub mod slice;

use std::sync::Arc;

use ndarray::{ArrayD, Axis};
use tracing::debug;
use zarrs::array::{data_type, Array, ArraySubset};
use zarrs::plugin::{ExtensionName, ZarrVersion};
use zarrs::filesystem::FilesystemStore;
use zarrs::storage::ReadableStorage;
use zarrs_http::HTTPStore;

use crate::error::ArrayError;
use crate::model::{ImageRepresentation, RepresentationFormat};

use slice::SliceSpec;

/// Path of the full-resolution array within an OME-NGFF store.
const NGFF_ARRAY_PATH: &str = "/0";

/// A handle to an out-of-memory N-D array.
///
/// Opening reads metadata only; bytes are pulled when a plane is fetched.
/// The handle is owned by the caller for a single materialize/slice/display
/// operation and is not shared or reused.
pub struct LazyArray {
    array: Array<dyn zarrs::storage::ReadableStorageTraits>,
    uri: String,
}

impl LazyArray {
    /// Open the array behind an image representation.
    ///
    /// Dispatches on the declared format tag: OME-NGFF opens the store at
    /// the primary URI, zipped OME-Zarr is recognized but unimplemented,
    /// and any other tag is rejected naming the tag and URI.
    pub fn open(representation: &ImageRepresentation) -> Result<Self, ArrayError> {
        let uri = representation.primary_uri().ok_or(ArrayError::MissingUri)?;

        match &representation.format {
            Some(RepresentationFormat::OmeNgff) => Self::open_ngff_uri(uri),
            Some(RepresentationFormat::OmeZarrZipped) => Err(ArrayError::ZippedZarrUnsupported {
                uri: uri.to_string(),
            }),
            Some(RepresentationFormat::Other(tag)) => Err(ArrayError::UnsupportedFormat {
                format: tag.clone(),
                uri: uri.to_string(),
            }),
            None => Err(ArrayError::UnsupportedFormat {
                format: "unspecified".to_string(),
                uri: uri.to_string(),
            }),
        }
    }

    /// Open an OME-NGFF store directly by URI.
    ///
    /// `http(s)` URIs are read over HTTP range requests; anything else is
    /// treated as a filesystem path (a `file://` prefix is stripped).
    pub fn open_ngff_uri(uri: &str) -> Result<Self, ArrayError> {
        let storage = open_storage(uri)?;
        let array = Array::open(storage, NGFF_ARRAY_PATH).map_err(|e| ArrayError::Store {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;

        debug!(
            uri,
            shape = ?array.shape(),
            data_type = %array.data_type(),
            "opened OME-NGFF array"
        );

        Ok(Self {
            array,
            uri: uri.to_string(),
        })
    }

    /// Shape of the backing array.
    pub fn shape(&self) -> &[u64] {
        self.array.shape()
    }

    /// Name of the backing array's element type.
    pub fn data_type_name(&self) -> String {
        self.array
            .data_type()
            .name(ZarrVersion::V3)
            .map(|name| name.to_string())
            .unwrap_or_else(|| self.array.data_type().to_string())
    }

    /// URI this handle was opened from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Fetch the sub-array selected by a slice specification.
    ///
    /// The resolved (c, z, t) triple pins the first three axes; free axes
    /// are kept whole. Pinned axes are removed from the result, so a fully
    /// pinned 5-D array yields a 2-D y-x plane. Element values are widened
    /// to `f32`.
    ///
    /// This is the only operation that reads chunk data.
    pub fn fetch_plane(&self, spec: &SliceSpec) -> Result<ArrayD<f32>, ArrayError> {
        let index = spec.resolve();
        let shape = self.array.shape().to_vec();
        let rank = shape.len();

        for axis in rank..3 {
            if let Some(coord) = index.pinned(axis) {
                return Err(ArrayError::IndexOutOfBounds {
                    axis,
                    index: coord,
                    size: 0,
                });
            }
        }

        let mut ranges = Vec::with_capacity(rank);
        for (axis, &size) in shape.iter().enumerate() {
            match index.pinned(axis) {
                Some(coord) => {
                    if coord >= size {
                        return Err(ArrayError::IndexOutOfBounds {
                            axis,
                            index: coord,
                            size,
                        });
                    }
                    ranges.push(coord..coord + 1);
                }
                None => ranges.push(0..size),
            }
        }

        let subset = ArraySubset::new_with_ranges(&ranges);
        debug!(uri = %self.uri, ?subset, "retrieving array subset");

        let read_err = |e: zarrs::array::ArrayError| ArrayError::Read(e.to_string());
        let dtype = self.array.data_type().clone();
        let mut plane: ArrayD<f32> = if dtype == data_type::uint8() {
            self.array
                .retrieve_array_subset_ndarray::<u8>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::uint16() {
            self.array
                .retrieve_array_subset_ndarray::<u16>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::uint32() {
            self.array
                .retrieve_array_subset_ndarray::<u32>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::int8() {
            self.array
                .retrieve_array_subset_ndarray::<i8>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::int16() {
            self.array
                .retrieve_array_subset_ndarray::<i16>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::int32() {
            self.array
                .retrieve_array_subset_ndarray::<i32>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else if dtype == data_type::float32() {
            self.array
                .retrieve_array_subset_ndarray::<f32>(&subset)
                .map_err(read_err)?
        } else if dtype == data_type::float64() {
            self.array
                .retrieve_array_subset_ndarray::<f64>(&subset)
                .map_err(read_err)?
                .mapv(|v| v as f32)
        } else {
            return Err(ArrayError::UnsupportedDataType(dtype.to_string()));
        };

        // Drop exactly the pinned axes, highest first so indices stay valid.
        for axis in (0..rank.min(3)).rev() {
            if index.pinned(axis).is_some() {
                plane = plane.index_axis_move(Axis(axis), 0);
            }
        }

        Ok(plane)
    }
}

/// Open a readable store for a representation URI.
fn open_storage(uri: &str) -> Result<ReadableStorage, ArrayError> {
    let store_err = |message: String| ArrayError::Store {
        uri: uri.to_string(),
        message,
    };

    if uri.starts_with("http://") || uri.starts_with("https://") {
        let store = HTTPStore::new(uri).map_err(|e| store_err(e.to_string()))?;
        Ok(Arc::new(store))
    } else {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        let store = FilesystemStore::new(path).map_err(|e| store_err(e.to_string()))?;
        Ok(Arc::new(store))
    }
}

// =============================================================================
// Tests
// =============================================================================
