//! Scripted transport for unit tests

use super::request::{RawResponse, RequestSpec};
use super::transport::{Transport, TransportFailure};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

type Reply = std::result::Result<RawResponse, TransportFailure>;

/// Replays queued replies in order and records every request it sees
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<(Instant, RequestSpec)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn json(self, status: u16, body: Value) -> Self {
        self.reply(Ok(RawResponse::json(status, &body)))
    }

    pub(crate) fn status(self, status: u16) -> Self {
        self.reply(Ok(RawResponse::new(status, "")))
    }

    pub(crate) fn fail(self, failure: TransportFailure) -> Self {
        self.reply(Err(failure))
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<RequestSpec> {
        self.seen.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn instants(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestSpec, _timeout: Duration) -> Reply {
        self.seen
            .lock()
            .unwrap()
            .push((Instant::now(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::Other("script exhausted".to_string())))
    }
}
