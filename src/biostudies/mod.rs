//! Legacy BioStudies submission documents.
//!
//! A submission is a tree of sections, each with typed attributes, links,
//! and subsections. The archive serves it as JSON; a flat TSV rendition of
//! the whole tree is derivable with [`Submission::as_tsv`]: each section
//! emits a row of its type/accession/parent-accession, followed by rows for
//! its attributes and links, recursing into subsections.

pub mod api;

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Submission tree
// =============================================================================

/// A qualified name/value pair attached to an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDetail {
    pub name: String,
    pub value: String,
}

/// A typed attribute of a section, link, or submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reference: bool,
    #[serde(default)]
    pub nmqual: Vec<AttributeDetail>,
    #[serde(default)]
    pub valqual: Vec<AttributeDetail>,
}

impl Attribute {
    /// One TSV row: `name<TAB>value`, with the name bracketed when this
    /// attribute is a reference.
    pub fn as_tsv(&self) -> String {
        let value = self.value.as_deref().unwrap_or_default();
        if self.reference {
            format!("<{}>\t{}\n", self.name, value)
        } else {
            format!("{}\t{}\n", self.name, value)
        }
    }
}

/// An outbound link of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Link {
    pub fn as_tsv(&self) -> String {
        let mut tsv = format!("\nLink\t{}\n", self.url);
        for attribute in &self.attributes {
            tsv.push_str(&attribute.as_tsv());
        }
        tsv
    }
}

/// One section of a submission tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default)]
    pub accno: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub subsections: Vec<Section>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Section {
    /// TSV block for this section and, recursively, its subsections.
    ///
    /// The header row carries the parent accession only for subsections,
    /// matching the flat submission format.
    pub fn as_tsv(&self, parent_accno: Option<&str>) -> String {
        let mut tsv = String::from("\n");

        let accno = self.accno.as_deref().unwrap_or_default();
        match (parent_accno, &self.accno) {
            (Some(parent), _) => {
                let _ = write!(tsv, "{}\t{}\t{}", self.section_type, accno, parent);
            }
            (None, Some(accno)) => {
                let _ = write!(tsv, "{}\t{}", self.section_type, accno);
            }
            (None, None) => tsv.push_str(&self.section_type),
        }
        tsv.push('\n');

        for attribute in &self.attributes {
            tsv.push_str(&attribute.as_tsv());
        }
        for link in &self.links {
            tsv.push_str(&link.as_tsv());
        }
        for subsection in &self.subsections {
            tsv.push_str(&subsection.as_tsv(self.accno.as_deref()));
        }

        tsv
    }

    /// Values of every "File List" attribute in this section and below,
    /// depth-first.
    fn collect_file_list_names(&self, names: &mut Vec<String>) {
        for attribute in &self.attributes {
            if attribute.name == "File List" {
                if let Some(value) = &attribute.value {
                    names.push(value.clone());
                }
            }
        }
        for subsection in &self.subsections {
            subsection.collect_file_list_names(names);
        }
    }
}

/// A complete submission document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub accno: Option<String>,
    pub section: Section,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Submission {
    /// TSV rendition of the whole submission tree.
    pub fn as_tsv(&self) -> String {
        let mut tsv = String::from("Submission");
        if let Some(accno) = &self.accno {
            let _ = write!(tsv, "\t{accno}");
        }
        tsv.push('\n');

        for attribute in &self.attributes {
            tsv.push_str(&attribute.as_tsv());
        }
        tsv.push_str(&self.section.as_tsv(None));

        tsv
    }

    /// Names of the file lists declared anywhere in the submission.
    pub fn file_list_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.section.collect_file_list_names(&mut names);
        names
    }
}

// =============================================================================
// File lists
// =============================================================================

/// One entry of a downloadable file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

// =============================================================================
// Search result models
// =============================================================================

/// One hit of the BioStudies search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResult {
    pub accession: String,
    pub title: String,
    pub author: String,
    pub links: u64,
    pub files: u64,
    pub release_date: NaiveDate,
    pub views: u64,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}

/// A page of BioStudies search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub page: u64,
    #[serde(rename = "pageSize")]
    pub page_size: u64,
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    #[serde(rename = "isTotalHitsExact")]
    pub is_total_hits_exact: bool,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
    #[serde(rename = "sortOrder")]
    pub sort_order: String,
    pub hits: Vec<StudyResult>,
}

// =============================================================================
// Tests
// =============================================================================
