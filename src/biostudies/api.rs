//! Client for the legacy BioStudies submission API.
//!
//! Two endpoints are consumed: the submission document
//! (`{base}/api/v1/studies/{accession}`) and downloadable file lists
//! (`{base}/files/{accession}/{flist_fname}`). Individual study files are
//! addressable under the same `files` prefix, which is also how preview
//! images are fetched.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use reqwest::blocking::{Client, Response};
use tracing::{debug, info};
use url::Url;

use crate::biostudies::{FileEntry, Submission};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// File extensions treated as directly displayable images.
const IMAGE_EXTS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// Whether a file path points at a directly displayable image.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTS.iter().any(|&known| known == ext)
        })
        .unwrap_or(false)
}

/// A study file with its resolved download URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImageFile {
    pub uri: Url,
    pub size: u64,
    pub path: PathBuf,
}

/// Client for the legacy BioStudies API.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: Client,
    base: Url,
}

impl SubmissionClient {
    /// Create a client for the configured BioStudies base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base: config.biostudies_base.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: &Url) -> Result<Response, ApiError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Fetch the submission document for an accession.
    pub fn submission(&self, accession_id: &str) -> Result<Submission, ApiError> {
        let url = self.endpoint(&["api", "v1", "studies", accession_id])?;
        info!(%url, "fetching submission");
        let response = self.get(&url)?;
        response.json().map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Download a named file list of a submission.
    pub fn file_list(
        &self,
        accession_id: &str,
        flist_fname: &str,
    ) -> Result<Vec<FileEntry>, ApiError> {
        let url = self.endpoint(&["files", accession_id, flist_fname])?;
        info!(%url, "fetching file list");
        let response = self.get(&url)?;
        response.json().map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Download URL of a study file, addressed by its original relative
    /// path.
    pub fn file_url(&self, accession_id: &str, relpath: &Path) -> Result<Url, ApiError> {
        let mut segments = vec!["files", accession_id];
        let components: Vec<&str> = relpath
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect();
        segments.extend(components);
        self.endpoint(&segments)
    }

    /// Resolve every displayable image file declared by the file lists of
    /// a submission.
    pub fn image_files(&self, accession_id: &str) -> Result<Vec<RemoteImageFile>, ApiError> {
        let submission = self.submission(accession_id)?;

        let mut images = Vec::new();
        for flist_fname in submission.file_list_names() {
            for entry in self.file_list(accession_id, &flist_fname)? {
                if is_image_file(&entry.path) {
                    images.push(RemoteImageFile {
                        uri: self.file_url(accession_id, &entry.path)?,
                        size: entry.size,
                        path: entry.path,
                    });
                }
            }
        }

        Ok(images)
    }

    /// Download and decode an image file (PNG/JPEG/TIFF).
    pub fn fetch_image(&self, url: &Url) -> Result<DynamicImage, ApiError> {
        let response = self.get(url)?;
        let bytes = response
            .bytes()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        image::load_from_memory(&bytes).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
