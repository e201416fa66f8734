//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, configuration, and scenario
//! loading so clients can bubble them up with consistent context. Credential
//! lookup failures are not runtime errors: they are absorbed by the kiosk's
//! failure policy and only show up in logs and events.
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid kiosk configuration")]
    InvalidConfig(#[from] kiosk_core::ConfigError),

    #[error("tick rate must be greater than zero")]
    ZeroTickRate,

    #[error("kiosk must be created from within a tokio runtime")]
    NoAsyncRuntime(#[source] tokio::runtime::TryCurrentError),

    #[error("runtime requires a credential oracle before building")]
    MissingOracle,

    #[error("runtime requires an actor source before building")]
    MissingActor,

    #[error("tick worker command channel closed")]
    CommandChannelClosed,

    #[error("tick worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("tick worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to read scenario file {path}")]
    ScenarioIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    ScenarioParse(#[from] ron::error::SpannedError),

    #[error("waypoint time {at} is not a finite, non-negative number of seconds")]
    InvalidWaypoint { at: f32 },
}
