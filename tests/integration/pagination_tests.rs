//! Cursor pagination over realistic archive records.
//!
//! Tests verify:
//! - Every matching record is yielded exactly once, in remote order
//! - Fetch cost is the expected page count plus the terminating empty page
//! - A mid-stream fetch failure surfaces once and fuses the iterator
//! - A degenerate page size still makes progress

use std::collections::BTreeMap;
use std::path::PathBuf;

use bia_explorer::{ApiError, CursorPages, FileReference};

fn file_reference(index: usize) -> FileReference {
    FileReference {
        uuid: format!("{index:08}"),
        study_uuid: "study-0001".to_string(),
        name: format!("raw/plate_{index}.czi"),
        original_relpath: PathBuf::from(format!("raw/plate_{index}.czi")),
        size: 1024 * index as u64,
        attributes: BTreeMap::new(),
    }
}

/// A fetch function backed by an in-memory ordered record set, serving
/// pages the way the search API does: records strictly after the cursor.
fn page_server(
    total: usize,
) -> impl FnMut(Option<&str>, usize) -> Result<Vec<FileReference>, ApiError> {
    let records: Vec<FileReference> = (0..total).map(file_reference).collect();
    move |cursor, limit| {
        let start = match cursor {
            Some(uuid) => {
                records
                    .iter()
                    .position(|r| r.uuid == uuid)
                    .map_or(records.len(), |i| i + 1)
            }
            None => 0,
        };
        Ok(records[start..(start + limit).min(records.len())].to_vec())
    }
}

// =============================================================================
// Completeness and Cost
// =============================================================================

#[test]
fn test_all_records_yielded_in_remote_order() {
    let pages = CursorPages::new(page_server(23), 5);

    let uuids: Vec<String> = pages.map(|r| r.unwrap().uuid).collect();

    assert_eq!(uuids.len(), 23);
    let expected: Vec<String> = (0..23).map(|i| format!("{i:08}")).collect();
    assert_eq!(uuids, expected);
}

#[test]
fn test_fetch_cost_includes_terminating_empty_page() {
    // A query matching N records costs ceil(N / P) + 1 fetches: a final
    // partial page does not short-circuit the scan.
    for (total, page_size, expected_fetches) in [(0, 5, 1), (23, 5, 6), (25, 5, 6), (5, 5, 2)] {
        let mut pages = CursorPages::new(page_server(total), page_size);

        let count = pages.by_ref().filter(|r| r.is_ok()).count();

        assert_eq!(count, total);
        assert_eq!(
            pages.pages_fetched(),
            expected_fetches,
            "total={total} page_size={page_size}"
        );
    }
}

#[test]
fn test_zero_page_size_is_clamped() {
    let pages = CursorPages::new(page_server(3), 0);

    let count = pages.filter(|r| r.is_ok()).count();

    assert_eq!(count, 3);
}

// =============================================================================
// Failure
// =============================================================================

#[test]
fn test_fetch_failure_surfaces_once_then_fuses() {
    let mut calls = 0;
    let fetch = move |cursor: Option<&str>, limit: usize| {
        calls += 1;
        if calls == 1 {
            assert!(cursor.is_none());
            Ok((0..limit).map(file_reference).collect())
        } else {
            Err(ApiError::Status {
                status: 503,
                url: "https://45.88.81.209:8080/search/file_references/exact_match".to_string(),
            })
        }
    };

    let mut pages = CursorPages::new(fetch, 4);

    let first_page: Vec<_> = pages.by_ref().take(4).collect();
    assert!(first_page.iter().all(Result::is_ok));

    match pages.next() {
        Some(Err(ApiError::Status { status, .. })) => assert_eq!(status, 503),
        other => panic!("expected the fetch failure, got {other:?}"),
    }
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
}
