//! High-level runtime orchestrator.
//!
//! The runtime owns the tick worker, wires up command/event channels, and
//! exposes a builder-based API for clients to run a kiosk.

use std::sync::Arc;
use std::time::Duration;

use kiosk_core::KioskConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::actor::ActorSource;
use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::kiosk::Kiosk;
use crate::oracle::CredentialOracle;
use crate::presentation::{NullPresentation, PresentationSink};
use crate::workers::{Command, TickWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub kiosk: KioskConfig,
    /// Frames per second driving the tick worker.
    pub tick_rate_hz: u32,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Upper bound for a single credential lookup (default: none)
    pub oracle_timeout: Option<Duration>,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_RATE_HZ: u32 = 30;

    /// Duration of one frame at the configured tick rate.
    pub fn frame_duration(&self) -> Result<Duration> {
        if self.tick_rate_hz == 0 {
            return Err(RuntimeError::ZeroTickRate);
        }
        Ok(Duration::from_secs(1) / self.tick_rate_hz)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            kiosk: KioskConfig::default(),
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            event_buffer_size: 100,
            command_buffer_size: 32,
            oracle_timeout: None,
        }
    }
}

/// Main runtime that runs a kiosk on a background tick worker
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the tick worker and wait for it to exit
    pub async fn shutdown(self) -> Result<()> {
        self.handle.request_shutdown().await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracle: Option<Arc<dyn CredentialOracle>>,
    presentation: Option<Box<dyn PresentationSink>>,
    actor: Option<Box<dyn ActorSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracle: None,
            presentation: None,
            actor: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required credential oracle
    pub fn oracle(mut self, oracle: impl CredentialOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// Set a shared credential oracle
    pub fn shared_oracle(mut self, oracle: Arc<dyn CredentialOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Set presentation sink (optional, defaults to [`NullPresentation`])
    pub fn presentation(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.presentation = Some(Box::new(sink));
        self
    }

    /// Set required actor source
    pub fn actor(mut self, actor: impl ActorSource + 'static) -> Self {
        self.actor = Some(Box::new(actor));
        self
    }

    /// Build the runtime and start ticking
    pub async fn build(self) -> Result<Runtime> {
        let oracle = self.oracle.ok_or(RuntimeError::MissingOracle)?;
        let actor = self.actor.ok_or(RuntimeError::MissingActor)?;
        let presentation = self
            .presentation
            .unwrap_or_else(|| Box::new(NullPresentation));
        let frame = self.config.frame_duration()?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let kiosk = Kiosk::new(self.config.kiosk, oracle, presentation)?
            .with_oracle_timeout(self.config.oracle_timeout)
            .with_event_bus(event_bus.clone());

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus);

        let worker = TickWorker::new(kiosk, actor, command_rx, frame);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
