//! Minimal [`CredentialOracle`] backed by an in-memory map.
use std::collections::HashMap;

use async_trait::async_trait;
use kiosk_core::{ActorId, CredentialId, CredentialSet};

use super::{CredentialOracle, OracleError};

/// CredentialOracle implementation with static holdings per actor
#[derive(Clone, Debug, Default)]
pub struct StaticCredentialOracle {
    holdings: HashMap<ActorId, CredentialSet>,
}

impl StaticCredentialOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `actor` with the given credentials (builder style).
    pub fn with_actor<C>(mut self, actor: impl Into<ActorId>, credentials: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<CredentialId>,
    {
        self.insert(actor, credentials.into_iter().collect());
        self
    }

    /// Replaces the holdings of `actor`.
    pub fn insert(&mut self, actor: impl Into<ActorId>, credentials: CredentialSet) {
        self.holdings.insert(actor.into(), credentials);
    }

    pub fn remove(&mut self, actor: &ActorId) -> Option<CredentialSet> {
        self.holdings.remove(actor)
    }
}

#[async_trait]
impl CredentialOracle for StaticCredentialOracle {
    async fn lookup(&self, actor: &ActorId) -> Result<CredentialSet, OracleError> {
        self.holdings
            .get(actor)
            .cloned()
            .ok_or_else(|| OracleError::ActorNotFound(actor.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_registered_holdings() {
        let oracle = StaticCredentialOracle::new().with_actor("alice", ["urn:a", "urn:b"]);

        let held = oracle.lookup(&ActorId::new("alice")).await.unwrap();
        assert_eq!(held.len(), 2);
        assert!(held.contains(&CredentialId::new("urn:b")));
    }

    #[tokio::test]
    async fn unknown_actor_is_an_error() {
        let oracle = StaticCredentialOracle::new();
        assert_eq!(
            oracle.lookup(&ActorId::new("bob")).await,
            Err(OracleError::ActorNotFound(ActorId::new("bob")))
        );
    }
}
