//! Latency wrapper used to emulate a remote identity service.
use std::time::Duration;

use async_trait::async_trait;
use kiosk_core::{ActorId, CredentialSet};

use super::{CredentialOracle, OracleError};

/// Delays every lookup of the inner oracle by a fixed latency.
#[derive(Clone, Debug)]
pub struct DelayedOracle<O> {
    inner: O,
    latency: Duration,
}

impl<O> DelayedOracle<O> {
    pub fn new(inner: O, latency: Duration) -> Self {
        Self { inner, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl<O: CredentialOracle> CredentialOracle for DelayedOracle<O> {
    async fn lookup(&self, actor: &ActorId) -> Result<CredentialSet, OracleError> {
        tokio::time::sleep(self.latency).await;
        self.inner.lookup(actor).await
    }
}
