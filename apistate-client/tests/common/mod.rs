//! Shared test doubles for client tests.

#![allow(dead_code)]

use apistate_client::{RequestDescriptor, Transport, TransportError, TransportResult};
use apistate_types::{Action, Dispatch};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Records every dispatched action in order.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    actions: Mutex<Vec<Action>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the actions recorded so far.
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Drains the recorded actions.
    pub fn take(&self) -> Vec<Action> {
        std::mem::take(&mut *self.actions.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

/// Replays queued outcomes in order and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<TransportResult<Value>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every response, to let concurrent operations interleave.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond_with(&self, document: Value) {
        self.outcomes.lock().unwrap().push_back(Ok(document));
    }

    pub fn fail_with(&self, error: TransportError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Returns the requests executed so far.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &RequestDescriptor) -> TransportResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self.outcomes.lock().unwrap().pop_front();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        outcome.unwrap_or_else(|| Err(TransportError::Network("no response queued".into())))
    }
}
