use thiserror::Error;

/// Errors that can occur when talking to the remote archive APIs
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network or connection error from the HTTP transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote service answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded into the expected model
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A fetch-by-identifier did not match any entity
    #[error("Entity not found: {url}")]
    NotFound { url: String },

    /// A name-expected-unique lookup matched more than one entity
    #[error("Name '{name}' is ambiguous: {count} matches")]
    AmbiguousName { name: String, count: usize },

    /// A base URL or joined URL is not valid
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors related to opening and reading image representation arrays
#[derive(Debug, Clone, Error)]
pub enum ArrayError {
    /// Representation format has no decoder path
    #[error("No automatic display supported for representation of type '{format}' at '{uri}'")]
    UnsupportedFormat { format: String, uri: String },

    /// Zipped OME-Zarr archives are recognized but not yet readable
    #[error("Zipped OME-Zarr is not supported yet: '{uri}'")]
    ZippedZarrUnsupported { uri: String },

    /// Representation declares no storage URI
    #[error("Representation has no storage URI")]
    MissingUri,

    /// The chunked-array store could not be opened
    #[error("Failed to open array store at '{uri}': {message}")]
    Store { uri: String, message: String },

    /// Chunk data could not be retrieved
    #[error("Failed to read array data: {0}")]
    Read(String),

    /// Array element type has no conversion to a greyscale plane
    #[error("Unsupported array data type: {0}")]
    UnsupportedDataType(String),

    /// A slice coordinate lies outside the array
    #[error("Index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds { axis: usize, index: u64, size: u64 },
}

/// Errors that can occur when turning a slice into a displayable raster
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Error while materializing the underlying array
    #[error("Array error: {0}")]
    Array(#[from] ArrayError),

    /// Resolved slice is not a 2-D plane
    #[error("Unable to display slice of shape {shape:?}: a 2-D y-x plane is required")]
    NotAPlane { shape: Vec<u64> },

    /// Resolved plane exceeds the configured size ceiling
    #[error("Plane of {height}x{width} exceeds the display limit of {limit} per dimension")]
    PlaneTooLarge { height: u64, width: u64, limit: u64 },

    /// Raster could not be encoded or written
    #[error("Encode error: {0}")]
    Encode(String),
}
