//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, PaginationState, Paginator};
use crate::models::timestamp;
use crate::types::StringMap;
use chrono::{Duration, NaiveDateTime};

// ============================================================================
// No Pagination
// ============================================================================

/// Single request, single page
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn initial_params(&self, _state: &PaginationState) -> StringMap {
        StringMap::new()
    }

    fn process_page(
        &self,
        records_count: usize,
        reported_total: Option<u64>,
        state: &mut PaginationState,
    ) -> NextPage {
        state.record_page(records_count as u64, reported_total);
        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// SolarEdge list endpoints take `startIndex` and `size`. Iteration stops on
/// a short page, or once the reported total has been fetched. When the
/// total disagrees with what pages actually hold, the records win: a short
/// page always ends the run and a full page continues it unless the total
/// has been reached.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit_value: u32,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value: limit_value.max(1),
        }
    }

    fn params_at(&self, offset: u64) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.offset_param.clone(), offset.to_string());
        params.insert(self.limit_param.clone(), self.limit_value.to_string());
        params
    }
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> StringMap {
        self.params_at(state.offset)
    }

    fn process_page(
        &self,
        records_count: usize,
        reported_total: Option<u64>,
        state: &mut PaginationState,
    ) -> NextPage {
        state.record_page(records_count as u64, reported_total);

        if records_count < self.limit_value as usize {
            state.mark_done();
            return NextPage::Done;
        }

        // A total below what was already fetched is contradicted by the records
        // themselves, so only a short page can end the run then
        if let Some(total) = state.reported_total {
            if state.total_fetched == total {
                state.mark_done();
                return NextPage::Done;
            }
        }

        state.add_offset(u64::from(self.limit_value));
        NextPage::Continue(self.params_at(state.offset))
    }
}

// ============================================================================
// Time Window Pagination
// ============================================================================

/// Splits a time range into consecutive windows, one request each
///
/// Windows are closed intervals of at most `max_window` that never overlap:
/// each one starts a second after the previous one ends. The cursor offset
/// is the index of the next window.
#[derive(Debug, Clone)]
pub struct WindowPaginator {
    /// Query parameter name for window start
    pub start_param: String,
    /// Query parameter name for window end
    pub end_param: String,
    windows: Vec<(NaiveDateTime, NaiveDateTime)>,
}

impl WindowPaginator {
    /// Create a window paginator over `[start, end]`
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        max_window: Duration,
        start_param: impl Into<String>,
        end_param: impl Into<String>,
    ) -> Self {
        Self {
            start_param: start_param.into(),
            end_param: end_param.into(),
            windows: split_windows(start, end, max_window),
        }
    }

    /// Windows in request order
    pub fn windows(&self) -> &[(NaiveDateTime, NaiveDateTime)] {
        &self.windows
    }

    fn params_at(&self, index: u64) -> StringMap {
        let mut params = StringMap::new();
        if let Some((start, end)) = usize::try_from(index).ok().and_then(|i| self.windows.get(i)) {
            params.insert(self.start_param.clone(), timestamp::format(start));
            params.insert(self.end_param.clone(), timestamp::format(end));
        }
        params
    }
}

impl Paginator for WindowPaginator {
    fn initial_params(&self, state: &PaginationState) -> StringMap {
        self.params_at(state.offset)
    }

    fn process_page(
        &self,
        records_count: usize,
        _reported_total: Option<u64>,
        state: &mut PaginationState,
    ) -> NextPage {
        // Totals are per window, so they say nothing about the whole range
        state.record_page(records_count as u64, None);
        state.add_offset(1);

        if state.offset >= self.windows.len() as u64 {
            state.mark_done();
            return NextPage::Done;
        }
        NextPage::Continue(self.params_at(state.offset))
    }
}

/// Split `[start, end]` into closed windows no longer than `max_window`
pub fn split_windows(
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_window: Duration,
) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let second = Duration::seconds(1);
    let span = if max_window > second { max_window - second } else { Duration::zero() };

    let mut windows = Vec::new();
    let mut current = start;
    while current <= end {
        let window_end = current
            .checked_add_signed(span)
            .map_or(end, |candidate| std::cmp::min(candidate, end));
        windows.push((current, window_end));
        match window_end.checked_add_signed(second) {
            Some(next) => current = next,
            None => break,
        }
    }
    windows
}
