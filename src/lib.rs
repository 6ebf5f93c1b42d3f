//! # bia-explorer
//!
//! A client for the BioImage Archive.
//!
//! This library lets a caller discover studies, enumerate their images and
//! file references, and materialize a 2-D slice of an N-dimensional
//! OME-NGFF image array as an 8-bit greyscale raster. Two remote APIs are
//! consumed:
//!
//! - the **integrator search API**: structured entities with exact-match
//!   search endpoints (cursor-paginated) and direct fetch-by-uuid
//!   endpoints;
//! - the **legacy BioStudies API**: nested submission documents, file
//!   lists, and raw study files.
//!
//! ## Architecture
//!
//! - [`client`] - API client, search filters, and the cursor paginator
//! - [`model`] - domain entities and navigation between them
//! - [`array`] - lazy materialization of OME-NGFF arrays and slice specs
//! - [`display`] - plane validation and raster conversion
//! - [`biostudies`] - legacy submission documents and TSV serialization
//! - [`render`] - HTML pretty-printing with per-entity field allow-lists
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use bia_explorer::{ApiClient, ClientConfig, DisplayOptions, LazyArray, RepresentationFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!
//!     let study = client
//!         .study_by_accession("S-BIAD144")?
//!         .ok_or("no such study")?;
//!
//!     let representations =
//!         study.image_representations(&client, &RepresentationFormat::OmeNgff)?;
//!     let array = LazyArray::open(&representations[0])?;
//!
//!     let raster = bia_explorer::display::display_slice(&array, None, &DisplayOptions::default())?;
//!     raster.save("plane.png")?;
//!     Ok(())
//! }
//! ```

pub mod array;
pub mod biostudies;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use array::slice::{PlaneIndex, SliceSpec};
pub use array::LazyArray;
pub use biostudies::api::{is_image_file, RemoteImageFile, SubmissionClient};
pub use biostudies::{Attribute, FileEntry, Link, QueryResult, Section, StudyResult, Submission};
pub use client::filter::{
    SearchCollectionFilter, SearchFileReferenceFilter, SearchFileRepresentation, SearchImageFilter,
    SearchStudy, SearchStudyFilter,
};
pub use client::paginate::{CursorPages, Record};
pub use client::ApiClient;
pub use config::{Cli, ClientConfig, Command, SliceArgs, DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
pub use display::{
    display_slice, rasterize, resize_to, write_png, DisplayOptions, DEFAULT_MAX_PLANE_DIM,
};
pub use error::{ApiError, ArrayError, RenderError};
pub use model::{
    Author, Collection, FileReference, Image, ImageRepresentation, RepresentationFormat, Study,
};
pub use render::RenderHtml;
