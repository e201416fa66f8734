//! Cloneable façade for talking to a running kiosk.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! querying the kiosk or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::kiosk::KioskStatus;
use crate::workers::Command;

/// Cheap to clone; every clone talks to the same tick worker.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Snapshot of the kiosk as seen by the tick worker between frames.
    pub async fn status(&self) -> Result<KioskStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryStatus { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Receiver for one topic's events.
    ///
    /// # Topics
    ///
    /// - `Topic::Visit` - Actor entering and leaving the zone
    /// - `Topic::Access` - Credential checks and phase changes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use kiosk_runtime::Topic;
    ///
    /// let mut access_rx = handle.subscribe(Topic::Access);
    /// while let Ok(event) = access_rx.recv().await {
    ///     // Handle phase changes
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Receivers for several topics, keyed by topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Ask the tick worker to stop. Idempotent.
    pub async fn request_shutdown(&self) {
        if self.command_tx.send(Command::Shutdown).await.is_err() {
            tracing::debug!("tick worker already stopped");
        }
    }
}
