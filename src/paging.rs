//! Cursor pagination for list screens.
//!
//! Taiga list endpoints take a 1-based `page` parameter. A [`Paginator`]
//! tracks which page was fetched last and pins the end of the list as soon
//! as a page comes back short. [`PagedList`] pairs a paginator with the
//! accumulated items and the [`ResultFlow`] the UI observes.

use log::{debug, info};
use std::future::Future;

use crate::api::ApiError;
use crate::constants::{LOG_LOADING_PAGE, LOG_PAGES_EXHAUSTED};
use crate::result::{LoadOptions, ResultFlow};

/// Page cursor with an end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: u32,
    max_page: Option<u32>,
    query: String,
    page_size: usize,
}

impl Paginator {
    /// A page size of 0 is treated as 1, so an empty page still ends the list.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 0,
            max_page: None,
            query: String::new(),
            page_size: page_size.max(1),
        }
    }

    /// Last successfully fetched page, 0 before the first fetch
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page the list ends on, once a short page has been seen
    pub fn max_page(&self) -> Option<u32> {
        self.max_page
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// True once the end of the list is known to have been fetched
    pub fn is_exhausted(&self) -> bool {
        self.max_page == Some(self.current_page)
    }

    /// Rewind to before the first page, keeping the query
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.max_page = None;
    }

    /// Switch to `query`, rewinding if it differs from the stored one.
    ///
    /// Returns `true` when the cursor was rewound.
    pub fn switch_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.reset();
        true
    }

    /// The page to fetch next, or `None` when the list is exhausted
    pub fn next_page(&self) -> Option<u32> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.current_page + 1)
        }
    }

    /// Record a successful fetch of `next_page()` that returned `fetched` items.
    pub fn advance(&mut self, fetched: usize) {
        self.current_page += 1;
        if fetched < self.page_size {
            self.max_page = Some(self.current_page);
        }
    }
}

/// Accumulating paged list bound to an observable result.
#[derive(Debug)]
pub struct PagedList<T> {
    paginator: Paginator,
    items: Vec<T>,
    result: ResultFlow<Vec<T>>,
}

impl<T: Clone> PagedList<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            paginator: Paginator::new(page_size),
            items: Vec::new(),
            result: ResultFlow::new(),
        }
    }

    /// The observable state of the whole list
    pub fn result(&self) -> &ResultFlow<Vec<T>> {
        &self.result
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn is_exhausted(&self) -> bool {
        self.paginator.is_exhausted()
    }

    /// Drop all items, rewind the cursor, clear the query and return the
    /// result to Nothing.
    pub fn reset(&mut self) {
        self.paginator = Paginator::new(self.paginator.page_size());
        self.items.clear();
        self.result.reset();
    }

    /// Fetch the next page for `query` and append it.
    ///
    /// A query different from the previous one starts over from page 1.
    /// Once the list is exhausted this is a no-op. A failed fetch publishes
    /// Error and leaves the cursor where it was, so calling again retries
    /// the same page.
    pub async fn load_next<F, Fut>(&mut self, query: &str, fetch: F) -> &[T]
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        self.load_next_with(query, LoadOptions::default(), fetch).await
    }

    pub async fn load_next_with<F, Fut>(&mut self, query: &str, options: LoadOptions, fetch: F) -> &[T]
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        if self.paginator.switch_query(query) {
            debug!("Query changed to '{}', starting over", query);
            self.items.clear();
            self.result.reset();
        }

        let Some(page) = self.paginator.next_page() else {
            debug!("{} (page {})", LOG_PAGES_EXHAUSTED, self.paginator.current_page());
            return &self.items;
        };

        info!("{} {}", LOG_LOADING_PAGE, page);
        let mut all = self.items.clone();
        let mut accumulated = None;
        let outcome = self
            .result
            .load_or_error_with(options, async {
                let fetched = fetch(page).await?;
                accumulated = Some(fetched.len());
                all.extend(fetched);
                Ok(all)
            })
            .await;

        if let (Some(all), Some(fetched)) = (outcome, accumulated) {
            self.paginator.advance(fetched);
            self.items = all;
        }

        &self.items
    }

    /// Start over with the current query and load its first page
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> &[T]
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let query = self.paginator.query().to_string();
        self.paginator.reset();
        self.items.clear();
        self.result.reset();
        self.load_next(&query, fetch).await
    }
}
