//! Cursor-based pagination over the search API.
//!
//! The search endpoints return an ordered page of records starting after a
//! given cursor (the uuid of the last record already seen). [`CursorPages`]
//! turns a page-fetch function into a lazy, non-restartable iterator over
//! every matching record:
//!
//! - the cursor starts at `None` and advances to the uuid of the last record
//!   of each fetched page;
//! - a page of zero records terminates the stream, so a query matching N
//!   records costs exactly ⌈N/P⌉+1 page fetches at page size P;
//! - a fetch failure is yielded once as an error, after which the iterator
//!   is fused.
//!
//! No local sorting takes place: record order within and across pages is the
//! remote service's own stable order.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::ApiError;

/// A record that can act as a pagination cursor.
pub trait Record {
    /// The strictly increasing identifier the cursor advances over.
    fn uuid(&self) -> &str;
}

/// Lazy iterator over all records matched by a paginated query.
///
/// Constructed by the `ApiClient` query methods; generic over the page-fetch
/// function so the pagination logic is independent of any transport.
pub struct CursorPages<T, F> {
    fetch: F,
    page_size: usize,
    cursor: Option<String>,
    buffered: VecDeque<T>,
    pages_fetched: usize,
    done: bool,
}

impl<T, F> CursorPages<T, F>
where
    T: Record,
    F: FnMut(Option<&str>, usize) -> Result<Vec<T>, ApiError>,
{
    /// Create a paginator that starts from the beginning of the result set.
    ///
    /// `fetch` receives the current cursor (uuid of the last record seen, or
    /// `None` on the first call) and the page size, and returns one page.
    pub fn new(fetch: F, page_size: usize) -> Self {
        Self {
            fetch,
            page_size: page_size.max(1),
            cursor: None,
            buffered: VecDeque::new(),
            pages_fetched: 0,
            done: false,
        }
    }

    /// Number of page fetches performed so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_next_page(&mut self) -> Result<(), ApiError> {
        let page = (self.fetch)(self.cursor.as_deref(), self.page_size)?;
        self.pages_fetched += 1;

        debug!(
            page = self.pages_fetched,
            records = page.len(),
            "fetched result page"
        );

        match page.last() {
            Some(last) => {
                self.cursor = Some(last.uuid().to_string());
                self.buffered.extend(page);
            }
            None => self.done = true,
        }

        Ok(())
    }
}

impl<T, F> Iterator for CursorPages<T, F>
where
    T: Record,
    F: FnMut(Option<&str>, usize) -> Result<Vec<T>, ApiError>,
{
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffered.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fetch_next_page() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
