//! Kiosk client: composition root for the simulated access kiosk.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (kiosk tick worker, oracle, presentation)
//!   └─→ Event journal (logs every bus event as JSON)
//! ```
//!
//! [`bootstrap`] turns a [`ClientConfig`] into a running [`Runtime`];
//! [`Client`] owns it until the session ends and then shuts it down.
pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{KioskSetup, bootstrap};
pub use config::{ClientConfig, SimulationConfig};

use std::time::Duration;

use anyhow::Result;
use kiosk_runtime::{Event, KioskStatus, Runtime, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. [`bootstrap`] builds the runtime and its collaborators
/// 2. [`Client::run`] starts the event journal
/// 3. The session runs until `run_for` elapses or Ctrl-C arrives
/// 4. The final kiosk status is captured and the runtime is shut down
pub struct Client {
    runtime: Runtime,
    run_for: Option<Duration>,
}

impl Client {
    pub fn new(runtime: Runtime, run_for: Option<Duration>) -> Self {
        Self { runtime, run_for }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Run the session and return the kiosk status observed just before
    /// shutdown.
    pub async fn run(self) -> Result<KioskStatus> {
        let handle = self.runtime.handle();
        let journal = spawn_event_journal(&handle);

        match self.run_for {
            Some(duration) => {
                tokio::select! {
                    _ = tokio::time::sleep(duration) => {
                        tracing::info!(?duration, "session finished");
                    }
                    result = tokio::signal::ctrl_c() => {
                        result?;
                        tracing::info!("interrupted");
                    }
                }
            }
            None => {
                tokio::signal::ctrl_c().await?;
                tracing::info!("interrupted");
            }
        }

        let status = handle.status().await?;
        tracing::info!(
            phase = %status.phase,
            door = ?status.intent.door_state(),
            "final kiosk status"
        );

        self.runtime.shutdown().await?;

        for task in journal {
            task.abort();
            let _ = task.await;
        }

        Ok(status)
    }
}

/// Log every event published on the runtime bus, one task per topic.
pub fn spawn_event_journal(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    handle
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => journal_event(topic, &event),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(?topic, skipped, "event journal lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

fn journal_event(topic: Topic, event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::info!(target: "kiosk::journal", ?topic, "{json}"),
        Err(err) => tracing::warn!(?topic, "failed to encode event: {err}"),
    }
}
