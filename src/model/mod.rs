//! Domain entities returned by the integrator search API.
//!
//! All entities are transient: they are deserialized fresh from each query
//! response and hold no connection to the client that produced them.
//! Navigation between related entities lives in [`navigate`] and always
//! takes an explicit [`crate::client::ApiClient`] reference.

pub mod navigate;

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::paginate::Record;

// =============================================================================
// RepresentationFormat
// =============================================================================

/// Declared storage format of an image representation.
///
/// The format tag determines which decoder path is legal. Unknown tags are
/// preserved verbatim so that errors can name them, but they never decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepresentationFormat {
    /// Native chunked-array format (OME-NGFF, i.e. an OME-Zarr store)
    OmeNgff,

    /// Zipped OME-Zarr archive (recognized, not yet readable)
    OmeZarrZipped,

    /// Any other declared format; carries the raw tag
    Other(String),
}

impl RepresentationFormat {
    /// Wire tag for the OME-NGFF format.
    pub const OME_NGFF: &'static str = "ome_ngff";

    /// Wire tag for the zipped OME-Zarr format.
    pub const ZIPPED_ZARR: &'static str = "zipped_zarr";

    /// The wire tag for this format.
    pub fn as_str(&self) -> &str {
        match self {
            RepresentationFormat::OmeNgff => Self::OME_NGFF,
            RepresentationFormat::OmeZarrZipped => Self::ZIPPED_ZARR,
            RepresentationFormat::Other(tag) => tag,
        }
    }
}

impl From<String> for RepresentationFormat {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::OME_NGFF => RepresentationFormat::OmeNgff,
            Self::ZIPPED_ZARR => RepresentationFormat::OmeZarrZipped,
            _ => RepresentationFormat::Other(tag),
        }
    }
}

impl From<RepresentationFormat> for String {
    fn from(format: RepresentationFormat) -> Self {
        format.as_str().to_string()
    }
}

impl std::fmt::Display for RepresentationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A study author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// A bioimage study.
///
/// Owns its images and file references by reference only: they are looked up
/// by `uuid` through the search API, not embedded in the study document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub uuid: String,
    pub accession_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub organism: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub imaging_type: Option<String>,
    /// Tag-like annotations as key/value pairs.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Preview image pointer, empty when the study has none.
    #[serde(default)]
    pub example_image_uri: String,
    #[serde(default)]
    pub images_count: u64,
    #[serde(default)]
    pub file_references_count: u64,
}

/// One logical image within a study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub uuid: String,
    /// Back-reference to the owning study; not ownership.
    pub study_uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_relpath: PathBuf,
    /// Dimension descriptor as declared by the archive, e.g. `"(1, 4, 1, 512, 512)"`.
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub representations: Vec<ImageRepresentation>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub alias: Option<String>,
}

/// One stored encoding of an image among possibly several for the same
/// logical image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRepresentation {
    /// Storage URIs; the first entry is the primary one.
    #[serde(default)]
    pub uri: Vec<String>,
    #[serde(rename = "type", default)]
    pub format: Option<RepresentationFormat>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub dimensions: Option<String>,
}

impl ImageRepresentation {
    /// The primary storage URI, if any is declared.
    pub fn primary_uri(&self) -> Option<&str> {
        self.uri.first().map(String::as_str)
    }
}

/// A non-image file belonging to a study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReference {
    pub uuid: String,
    pub study_uuid: String,
    #[serde(default)]
    pub name: String,
    pub original_relpath: PathBuf,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A curated collection of studies, looked up by its unique name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub study_uuids: Vec<String>,
}

// =============================================================================
// Pagination records
// =============================================================================

impl Record for Study {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Record for Image {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Record for FileReference {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

// =============================================================================
// Tests
// =============================================================================
