//! Client for the integrator search API.
//!
//! [`ApiClient`] wraps a blocking HTTP client and the configured base URL.
//! It exposes three kinds of operations:
//!
//! - **Fetch by id**: `get_study`, `get_image`, `get_file_reference` -
//!   GET `{base}/{kind}/{uuid}`, returning the entity or
//!   [`ApiError::NotFound`].
//! - **Single-page search**: `search_*` - POST
//!   `{base}/search/{kind}/exact_match` with a JSON filter, returning one
//!   ordered page.
//! - **Paginated queries**: `all_studies`, `study_images`,
//!   `study_file_references`, ... - lazy [`CursorPages`] iterators built on
//!   the single-page searches.
//!
//! Every call is a fresh network round trip; nothing is memoized.

pub mod filter;
pub mod paginate;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{Collection, FileReference, Image, RepresentationFormat, Study};

use filter::{
    SearchCollectionFilter, SearchFileReferenceFilter, SearchFileRepresentation,
    SearchImageFilter, SearchStudy, SearchStudyFilter,
};
use paginate::CursorPages;

/// Client for the integrator search API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // HTTP plumbing
    // =========================================================================

    /// Join path segments onto the API base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.config.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn check_status(url: &Url, response: Response) -> Result<Response, ApiError> {
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

    fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, ApiError> {
        response.json().map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let response = Self::check_status(&url, response)?;
        Self::decode(&url, response)
    }

    fn post_search<T, B>(&self, segments: &[&str], body: &B) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + std::fmt::Debug,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, filter = ?body, "POST search");
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let response = Self::check_status(&url, response)?;
        Self::decode(&url, response)
    }

    // =========================================================================
    // Fetch by id
    // =========================================================================

    /// Fetch a study by uuid.
    pub fn get_study(&self, uuid: &str) -> Result<Study, ApiError> {
        self.get_json(self.endpoint(&["studies", uuid])?)
    }

    /// Fetch an image by uuid.
    pub fn get_image(&self, uuid: &str) -> Result<Image, ApiError> {
        self.get_json(self.endpoint(&["images", uuid])?)
    }

    /// Fetch a file reference by uuid.
    pub fn get_file_reference(&self, uuid: &str) -> Result<FileReference, ApiError> {
        self.get_json(self.endpoint(&["file_references", uuid])?)
    }

    // =========================================================================
    // Single-page searches
    // =========================================================================

    /// Fetch one page of studies matching the filter.
    pub fn search_studies(&self, filter: &SearchStudyFilter) -> Result<Vec<Study>, ApiError> {
        self.post_search(&["search", "studies", "exact_match"], filter)
    }

    /// Fetch one page of images matching the filter.
    pub fn search_images(&self, filter: &SearchImageFilter) -> Result<Vec<Image>, ApiError> {
        self.post_search(&["search", "images", "exact_match"], filter)
    }

    /// Fetch one page of file references matching the filter.
    pub fn search_file_references(
        &self,
        filter: &SearchFileReferenceFilter,
    ) -> Result<Vec<FileReference>, ApiError> {
        self.post_search(&["search", "file_references", "exact_match"], filter)
    }

    /// Fetch the collections matching the filter.
    pub fn search_collections(
        &self,
        filter: &SearchCollectionFilter,
    ) -> Result<Vec<Collection>, ApiError> {
        self.post_search(&["search", "collections", "exact_match"], filter)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Look up a study by accession id.
    ///
    /// Returns `Ok(None)` when no study matches.
    pub fn study_by_accession(&self, accession_id: &str) -> Result<Option<Study>, ApiError> {
        let filter = SearchStudyFilter {
            limit: Some(1),
            study_match: Some(SearchStudy {
                accession_id: Some(accession_id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        Ok(self.search_studies(&filter)?.into_iter().next())
    }

    /// Look up a study image by its alias.
    ///
    /// Returns `Ok(None)` when no image carries the alias.
    pub fn study_image_by_alias(
        &self,
        accession_id: &str,
        alias: &str,
    ) -> Result<Option<Image>, ApiError> {
        let mut url = self.endpoint(&["studies", accession_id, "images_by_aliases"])?;
        url.query_pairs_mut().append_pair("aliases", alias);
        let images: Vec<Image> = self.get_json(url)?;
        Ok(images.into_iter().next())
    }

    /// Look up a collection by its name.
    ///
    /// Collection names are expected to be unique: zero matches yield
    /// `Ok(None)`, more than one is an [`ApiError::AmbiguousName`] error.
    pub fn collection_by_name(&self, name: &str) -> Result<Option<Collection>, ApiError> {
        let filter = SearchCollectionFilter {
            name: Some(name.to_string()),
        };
        unique_match(name, self.search_collections(&filter)?)
    }

    // =========================================================================
    // Paginated queries
    // =========================================================================

    /// Iterate over every study in the archive.
    pub fn all_studies(
        &self,
    ) -> CursorPages<Study, impl FnMut(Option<&str>, usize) -> Result<Vec<Study>, ApiError> + '_>
    {
        CursorPages::new(
            move |cursor, limit| {
                self.search_studies(&SearchStudyFilter {
                    start_uuid: cursor.map(str::to_string),
                    limit: Some(limit),
                    study_match: None,
                })
            },
            self.config.page_size,
        )
    }

    /// Iterate over every image of a study.
    pub fn study_images(
        &self,
        study_uuid: &str,
    ) -> CursorPages<Image, impl FnMut(Option<&str>, usize) -> Result<Vec<Image>, ApiError> + '_>
    {
        let study_uuid = study_uuid.to_string();
        CursorPages::new(
            move |cursor, limit| {
                self.search_images(&SearchImageFilter {
                    start_uuid: cursor.map(str::to_string),
                    limit: Some(limit),
                    study_uuid: Some(study_uuid.clone()),
                    image_representations_any: None,
                })
            },
            self.config.page_size,
        )
    }

    /// Iterate over the images of a study carrying a representation of the
    /// given format.
    pub fn study_images_with_representation(
        &self,
        study_uuid: &str,
        format: &RepresentationFormat,
    ) -> CursorPages<Image, impl FnMut(Option<&str>, usize) -> Result<Vec<Image>, ApiError> + '_>
    {
        let study_uuid = study_uuid.to_string();
        let format = format.clone();
        CursorPages::new(
            move |cursor, limit| {
                self.search_images(&SearchImageFilter {
                    start_uuid: cursor.map(str::to_string),
                    limit: Some(limit),
                    study_uuid: Some(study_uuid.clone()),
                    image_representations_any: Some(vec![SearchFileRepresentation {
                        format: format.clone(),
                    }]),
                })
            },
            self.config.page_size,
        )
    }

    /// Iterate over every file reference of a study.
    pub fn study_file_references(
        &self,
        study_uuid: &str,
    ) -> CursorPages<
        FileReference,
        impl FnMut(Option<&str>, usize) -> Result<Vec<FileReference>, ApiError> + '_,
    > {
        let study_uuid = study_uuid.to_string();
        CursorPages::new(
            move |cursor, limit| {
                self.search_file_references(&SearchFileReferenceFilter {
                    start_uuid: cursor.map(str::to_string),
                    limit: Some(limit),
                    study_uuid: Some(study_uuid.clone()),
                })
            },
            self.config.page_size,
        )
    }
}

/// Enforce uniqueness of a name-expected-unique lookup.
///
/// Zero matches yield `Ok(None)`; more than one is an ambiguity error.
fn unique_match<T>(name: &str, mut matches: Vec<T>) -> Result<Option<T>, ApiError> {
    if matches.len() > 1 {
        return Err(ApiError::AmbiguousName {
            name: name.to_string(),
            count: matches.len(),
        });
    }
    Ok(matches.pop())
}

// =============================================================================
// Tests
// =============================================================================
