//! Request bodies for the exact-match search endpoints.
//!
//! Each filter carries the pagination window (`start_uuid`, `limit`) plus
//! equality predicates. Fields set to `None` are omitted from the JSON body
//! and place no constraint on the search.

use serde::Serialize;

use crate::model::RepresentationFormat;

/// Equality predicates on study fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStudy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
}

/// Filter for `search/studies/exact_match`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStudyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_match: Option<SearchStudy>,
}

/// Representation predicate used when filtering images by available format.
#[derive(Debug, Clone, Serialize)]
pub struct SearchFileRepresentation {
    #[serde(rename = "type")]
    pub format: RepresentationFormat,
}

/// Filter for `search/images/exact_match`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchImageFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_uuid: Option<String>,
    /// Match images carrying at least one representation of any listed format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_representations_any: Option<Vec<SearchFileRepresentation>>,
}

/// Filter for `search/file_references/exact_match`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchFileReferenceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_uuid: Option<String>,
}

/// Filter for `search/collections/exact_match`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchCollectionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
