//! Submission document parsing and TSV serialization.
//!
//! Tests verify:
//! - A realistic BioStudies JSON document round-trips into the model
//! - TSV output of a nested tree, byte for byte
//! - File list discovery across nested sections
//! - Image filename classification

use std::path::Path;

use bia_explorer::{is_image_file, FileEntry, Submission};

const SUBMISSION_JSON: &str = r#"{
    "accno": "S-BIAD7",
    "attributes": [
        {"name": "Title", "value": "Imaging of cortical organoids"},
        {"name": "ReleaseDate", "value": "2021-03-09"}
    ],
    "section": {
        "type": "Study",
        "attributes": [
            {"name": "Description", "value": "Light sheet imaging."},
            {"name": "Organism", "value": "Homo sapiens", "reference": true}
        ],
        "links": [
            {
                "url": "https://www.ebi.ac.uk/ols/ontologies/efo",
                "attributes": [{"name": "Type", "value": "Ontology"}]
            }
        ],
        "subsections": [
            {
                "type": "Study Component",
                "accno": "Study Component-1",
                "attributes": [
                    {"name": "Name", "value": "Primary screen"},
                    {"name": "File List", "value": "file_list_primary.json"}
                ],
                "subsections": [
                    {
                        "type": "Image Acquisition",
                        "accno": "Image Acquisition-1",
                        "attributes": [
                            {"name": "Imaging Method", "value": "light sheet fluorescence microscopy"}
                        ]
                    }
                ]
            },
            {
                "type": "Study Component",
                "accno": "Study Component-2",
                "attributes": [
                    {"name": "File List", "value": "file_list_secondary.json"}
                ]
            }
        ]
    }
}"#;

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_realistic_document_parses() {
    let submission: Submission = serde_json::from_str(SUBMISSION_JSON).unwrap();

    assert_eq!(submission.accno.as_deref(), Some("S-BIAD7"));
    assert_eq!(submission.section.section_type, "Study");
    assert_eq!(submission.section.subsections.len(), 2);

    let organism = &submission.section.attributes[1];
    assert_eq!(organism.name, "Organism");
    assert!(organism.reference);
}

#[test]
fn test_file_entry_parses_with_defaults() {
    let entry: FileEntry =
        serde_json::from_str(r#"{"path": "images/well_A1.tiff", "size": 2048}"#).unwrap();

    assert_eq!(entry.path.to_str(), Some("images/well_A1.tiff"));
    assert_eq!(entry.size, 2048);
    assert!(entry.attributes.is_empty());
}

// =============================================================================
// TSV Serialization
// =============================================================================

#[test]
fn test_nested_tree_tsv_output() {
    let submission: Submission = serde_json::from_str(SUBMISSION_JSON).unwrap();

    let expected = "\
Submission\tS-BIAD7
Title\tImaging of cortical organoids
ReleaseDate\t2021-03-09

Study
Description\tLight sheet imaging.
<Organism>\tHomo sapiens

Link\thttps://www.ebi.ac.uk/ols/ontologies/efo
Type\tOntology

Study Component\tStudy Component-1
Name\tPrimary screen
File List\tfile_list_primary.json

Image Acquisition\tImage Acquisition-1\tStudy Component-1
Imaging Method\tlight sheet fluorescence microscopy

Study Component\tStudy Component-2
File List\tfile_list_secondary.json
";

    assert_eq!(submission.as_tsv(), expected);
}

// =============================================================================
// File Lists
// =============================================================================

#[test]
fn test_file_lists_collected_depth_first() {
    let submission: Submission = serde_json::from_str(SUBMISSION_JSON).unwrap();

    assert_eq!(
        submission.file_list_names(),
        vec!["file_list_primary.json", "file_list_secondary.json"]
    );
}

#[test]
fn test_image_filename_classification() {
    assert!(is_image_file(Path::new("images/well_A1.tiff")));
    assert!(is_image_file(Path::new("preview.PNG")));
    assert!(is_image_file(Path::new("scan.Jpg")));
    assert!(!is_image_file(Path::new("file_list_primary.json")));
    assert!(!is_image_file(Path::new("raw/plate_1.czi")));
    assert!(!is_image_file(Path::new("README")));
}
