//! Credential oracles: the identity service a kiosk consults.
//!
//! The runtime treats a lookup as a single opaque async call. Implementations
//! may hit a network service, a local table, or a test fixture; the kiosk only
//! sees a [`CredentialSet`] or an [`OracleError`].
mod delayed;
mod table;

use std::time::Duration;

use async_trait::async_trait;
use kiosk_core::{ActorId, CredentialSet};
use thiserror::Error;

pub use delayed::DelayedOracle;
pub use table::StaticCredentialOracle;

/// Reasons a lookup produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("no identity record for actor {0}")]
    ActorNotFound(ActorId),

    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    #[error("identity lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("identity lookup task failed: {0}")]
    Aborted(String),
}

/// Asynchronous source of the credentials an actor holds.
#[async_trait]
pub trait CredentialOracle: Send + Sync {
    /// Returns every credential `actor` currently holds.
    async fn lookup(&self, actor: &ActorId) -> Result<CredentialSet, OracleError>;
}
