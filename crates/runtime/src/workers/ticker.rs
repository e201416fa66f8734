//! Tick worker that owns the authoritative [`Kiosk`].
//!
//! Drives the kiosk from a fixed-rate interval, feeding it the real time
//! elapsed between frames, and answers commands from [`RuntimeHandle`]
//! between ticks.
//!
//! [`RuntimeHandle`]: crate::api::RuntimeHandle

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::actor::ActorSource;
use crate::kiosk::{Kiosk, KioskStatus};

/// Commands that can be sent to the tick worker
pub enum Command {
    /// Query the current kiosk status (read-only).
    QueryStatus { reply: oneshot::Sender<KioskStatus> },
    /// Stop ticking and exit the worker loop.
    Shutdown,
}

/// Background task that advances the kiosk once per frame.
pub struct TickWorker {
    kiosk: Kiosk,
    actor: Box<dyn ActorSource>,
    command_rx: mpsc::Receiver<Command>,
    frame: Duration,
}

impl TickWorker {
    pub fn new(
        kiosk: Kiosk,
        actor: Box<dyn ActorSource>,
        command_rx: mpsc::Receiver<Command>,
        frame: Duration,
    ) -> Self {
        tracing::info!(
            "TickWorker initialized: frame={:?}, required credential={}",
            frame,
            kiosk.config().required_credential
        );

        Self {
            kiosk,
            actor,
            command_rx,
            frame,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Instant::now();
                    let delta = now.saturating_duration_since(last_frame);
                    last_frame = now;
                    self.actor.advance(delta);
                    self.kiosk.tick(delta, self.actor.as_ref());
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::QueryStatus { reply }) => {
                        if reply.send(self.kiosk.status()).is_err() {
                            debug!("QueryStatus reply channel closed (caller dropped)");
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }

        debug!(status = ?self.kiosk.status(), "TickWorker stopped");
    }
}
