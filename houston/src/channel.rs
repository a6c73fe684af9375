//! The `weHaveAProblem` broadcast channel.
//!
//! An [`ErrorChannel`] is created once by the hosting application and handed
//! (by clone) to every component that publishes or listens. Two kinds of
//! listeners are supported:
//!
//! - synchronous handlers registered with [`ErrorChannel::subscribe`], run on
//!   the emitting thread, in registration order, before `emit` returns;
//! - async streams obtained from [`ErrorChannel::stream`], fed through a
//!   `tokio::sync::broadcast` channel and allowed to lag.
//!
//! A handler that returns an error or panics is logged and skipped; the
//! remaining handlers still run and the emitter never sees the failure.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::{trace, warn};

use crate::record::ErrorRecord;

/// Name of the process-wide error channel.
pub const CHANNEL_NAME: &str = "weHaveAProblem";

/// Stream buffer used by [`ErrorChannel::new`].
pub const DEFAULT_STREAM_CAPACITY: usize = 256;

/// Smaller stream buffers are raised to this size.
pub const MIN_STREAM_CAPACITY: usize = 16;

/// Larger stream buffers are lowered to this size.
pub const MAX_STREAM_CAPACITY: usize = 65_536;

type Handler = Arc<dyn Fn(&ErrorRecord) -> anyhow::Result<()> + Send + Sync>;

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Envelope delivered to stream subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    /// Name of the channel that carried the record.
    pub event: String,
    pub record: ErrorRecord,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a single [`ErrorChannel::emit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Handlers that completed successfully.
    pub delivered: usize,
    /// Handlers that returned an error or panicked.
    pub failed: usize,
    /// Stream receivers the event was queued for.
    pub streamed: usize,
}

impl EmitReport {
    pub fn all_delivered(&self) -> bool {
        self.failed == 0
    }
}

struct Registry {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

struct Shared {
    name: String,
    registry: RwLock<Registry>,
    stream: broadcast::Sender<ErrorEvent>,
}

/// Publish/subscribe channel for produced error records.
///
/// Cloning is cheap; all clones share the same subscribers.
#[derive(Clone)]
pub struct ErrorChannel {
    shared: Arc<Shared>,
}

impl ErrorChannel {
    /// Create the `weHaveAProblem` channel with the default stream buffer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STREAM_CAPACITY)
    }

    /// Create the `weHaveAProblem` channel with the given stream buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::named(CHANNEL_NAME, capacity)
    }

    /// Create a channel with a custom name.
    ///
    /// The stream buffer is clamped to
    /// `MIN_STREAM_CAPACITY..=MAX_STREAM_CAPACITY`.
    pub fn named(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_STREAM_CAPACITY, MAX_STREAM_CAPACITY);
        let (stream, _) = broadcast::channel(capacity);
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                registry: RwLock::new(Registry {
                    next_id: 0,
                    handlers: Vec::new(),
                }),
                stream,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Register a synchronous handler, run on every future emit.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ErrorRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut registry = self.write_registry();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        trace!(channel = %self.name(), subscription = %id, "Handler subscribed");
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.write_registry();
        let before = registry.handlers.len();
        registry.handlers.retain(|(existing, _)| *existing != id);
        before != registry.handlers.len()
    }

    /// Number of registered synchronous handlers.
    pub fn subscriber_count(&self) -> usize {
        self.read_registry().handlers.len()
    }

    /// Open an async feed of every subsequently emitted record.
    pub fn stream(&self) -> broadcast::Receiver<ErrorEvent> {
        self.shared.stream.subscribe()
    }

    /// Deliver `record` to every handler, then to stream receivers.
    ///
    /// Handlers run in registration order against the same record. The set
    /// of handlers is fixed when the emit starts, so handlers may subscribe,
    /// unsubscribe or emit again without deadlocking.
    pub fn emit(&self, record: &ErrorRecord) -> EmitReport {
        let handlers: Vec<(SubscriptionId, Handler)> = self.read_registry().handlers.clone();
        let mut report = EmitReport::default();

        for (id, handler) in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(record))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    warn!(
                        channel = %self.name(),
                        subscription = %id,
                        error = %err,
                        "Error handler failed"
                    );
                }
                Err(payload) => {
                    report.failed += 1;
                    warn!(
                        channel = %self.name(),
                        subscription = %id,
                        panic = %panic_message(payload.as_ref()),
                        "Error handler panicked"
                    );
                }
            }
        }

        if self.shared.stream.receiver_count() > 0 {
            let event = ErrorEvent {
                event: self.shared.name.clone(),
                record: record.clone(),
                timestamp: Utc::now(),
            };
            // Receivers may drop between the count check and the send.
            if let Ok(receivers) = self.shared.stream.send(event) {
                report.streamed = receivers;
            }
        }

        trace!(
            channel = %self.name(),
            delivered = report.delivered,
            failed = report.failed,
            streamed = report.streamed,
            "Record emitted"
        );
        report
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.shared
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorChannel")
            .field("name", &self.shared.name)
            .field("subscribers", &self.subscriber_count())
            .field("streams", &self.shared.stream.receiver_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
