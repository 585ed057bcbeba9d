//! Pagination module
//!
//! Supports: single page, offset (`startIndex`/`size`), time windows
//!
//! # Overview
//!
//! The pagination module turns endpoints whose results span several
//! requests into one lazy record stream. A strategy decides the query
//! parameters of each request and when to stop; the [`Pager`] drives it.

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{split_windows, NoPaginator, OffsetPaginator, WindowPaginator};
pub use types::{NextPage, PaginationState, Paginator, RecordStream};

#[cfg(test)]
mod tests;
