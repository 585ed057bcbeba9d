//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::types::StringMap;
use futures::stream::BoxStream;

/// Lazy sequence of typed records produced by a pagination run
pub type RecordStream<'a, T> = BoxStream<'a, Result<T>>;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these query parameters
    Continue(StringMap),
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = StringMap::new();
        params.insert(key.into(), value.into());
        Self::Continue(params)
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Page cursor for one pagination run
///
/// Owned by the pager and only mutated between calls. The offset never
/// decreases within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next page
    pub offset: u64,
    /// Pages fetched so far
    pub page: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Total count reported by the service, once known
    pub reported_total: Option<u64>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record a fetched page
    pub fn record_page(&mut self, records: u64, reported_total: Option<u64>) {
        self.page += 1;
        self.total_fetched += records;
        if reported_total.is_some() {
            self.reported_total = reported_total;
        }
    }

    /// Move the offset forward
    pub fn add_offset(&mut self, amount: u64) {
        self.offset += amount;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> StringMap;

    /// Account for a fetched page and decide whether another one follows
    fn process_page(
        &self,
        records_count: usize,
        reported_total: Option<u64>,
        state: &mut PaginationState,
    ) -> NextPage;
}
