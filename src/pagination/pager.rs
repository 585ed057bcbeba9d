//! Pager
//!
//! Drives a pagination strategy against the dispatcher and flattens the
//! pages into one lazy record stream. Nothing is requested until the stream
//! is polled, pages go out strictly one after another, and the first error
//! ends the stream after every record of earlier pages has been yielded.

use super::types::{NextPage, PaginationState, Paginator, RecordStream};
use crate::decode::{decode_page, Record, RecordShape};
use crate::error::Result;
use crate::http::{Dispatcher, RequestSpec};
use crate::types::StringMap;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

/// Pagination run over one endpoint
pub struct Pager {
    paginator: Box<dyn Paginator>,
    shape: RecordShape,
    state: PaginationState,
}

impl Pager {
    /// Create a pager for records found at `shape`
    pub fn new(paginator: impl Paginator + 'static, shape: RecordShape) -> Self {
        Self {
            paginator: Box::new(paginator),
            shape,
            state: PaginationState::new(),
        }
    }

    /// Current cursor
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Turn the run into a lazy stream of records
    pub fn into_stream<T: Record>(
        self,
        dispatcher: &Dispatcher,
        request: RequestSpec,
    ) -> RecordStream<'_, T> {
        let params = self.paginator.initial_params(&self.state);
        let run = Run {
            pager: self,
            dispatcher,
            request,
            params,
            buffer: VecDeque::new(),
            phase: Phase::Fetching,
        };

        stream::unfold(run, |mut run| async move {
            loop {
                if let Some(record) = run.buffer.pop_front() {
                    return Some((Ok(record), run));
                }
                match run.phase {
                    Phase::Done | Phase::Failed => return None,
                    Phase::Fetching => {}
                }
                if let Err(e) = run.fetch_page().await {
                    run.phase = Phase::Failed;
                    return Some((Err(e), run));
                }
            }
        })
        .boxed()
    }
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("shape", &self.shape)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fetching,
    Done,
    Failed,
}

struct Run<'a, T> {
    pager: Pager,
    dispatcher: &'a Dispatcher,
    request: RequestSpec,
    params: StringMap,
    buffer: VecDeque<T>,
    phase: Phase,
}

impl<T: Record> Run<'_, T> {
    /// Fetch and decode one page; records are buffered only once the whole page decoded
    async fn fetch_page(&mut self) -> Result<()> {
        let request = self.request.clone().with_query(self.params.clone());
        let body = self.dispatcher.execute(&request).await?;
        let page = decode_page::<T>(&body, &self.pager.shape)?;

        let count = page.records.len();
        let next = self
            .pager
            .paginator
            .process_page(count, page.reported_total, &mut self.pager.state);
        debug!(
            "{} page {}: {count} {} records ({} so far)",
            request.path,
            self.pager.state.page,
            T::KIND,
            self.pager.state.total_fetched
        );

        match next {
            NextPage::Continue(params) => self.params = params,
            NextPage::Done => self.phase = Phase::Done,
        }
        self.buffer.extend(page.records);
        Ok(())
    }
}
