//! Generation-keyed asynchronous suggestion requests.
//!
//! # Responsibility
//! - Run suggestion fetches on the tokio runtime without blocking callers.
//! - Deliver only the newest request's outcome to the presentation.
//!
//! # Invariants
//! - Each `dispatch` bumps the generation and aborts the previous task.
//! - An outcome whose generation is no longer current is never sent.
//! - A dropped receiver silently discards outcomes.

use super::client::{SuggestionClient, SuggestionOutcome};
use super::{SuggestionRequest, SuggestionTransport};
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outcome tagged with the generation of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionUpdate {
    pub generation: u64,
    pub outcome: SuggestionOutcome,
}

pub struct SuggestionDispatcher<T: SuggestionTransport + 'static> {
    client: Arc<SuggestionClient<T>>,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
}

impl<T: SuggestionTransport + 'static> SuggestionDispatcher<T> {
    /// Creates a dispatcher and the receiver the presentation listens on.
    pub fn new(client: SuggestionClient<T>) -> (Self, mpsc::UnboundedReceiver<SuggestionUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client: Arc::new(client),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
            updates,
        };
        (dispatcher, receiver)
    }

    /// Starts a new request, superseding any request still in flight.
    ///
    /// Must be called from within a tokio runtime. Returns the generation
    /// assigned to this request.
    pub fn dispatch(&mut self, request: SuggestionRequest) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!(
                    "event=suggest_dispatch module=suggest status=skip superseded_by={generation}"
                );
            }
            previous.abort();
        }

        let client = Arc::clone(&self.client);
        let current = Arc::clone(&self.generation);
        let updates = self.updates.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = client.fetch_outcome(&request).await;
            if current.load(Ordering::SeqCst) != generation {
                debug!("event=suggest_deliver module=suggest status=skip generation={generation} reason=stale");
                return;
            }
            if updates.send(SuggestionUpdate { generation, outcome }).is_err() {
                debug!("event=suggest_deliver module=suggest status=skip generation={generation} reason=receiver_closed");
            }
        }));
        generation
    }

    /// Generation of the most recent `dispatch`, `0` before the first one.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `update` still belongs to the newest request.
    pub fn is_current(&self, update: &SuggestionUpdate) -> bool {
        update.generation == self.current_generation()
    }

    /// Waits for the in-flight request, if any, to finish or be aborted.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            let _ = handle.await;
        }
    }
}

impl<T: SuggestionTransport + 'static> Drop for SuggestionDispatcher<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
