//! Assemble a runtime from [`ClientConfig`].
//!
//! The demo kiosk talks to a simulated credential service with fixed
//! latency and drives a scripted visitor, either the built-in walk up to the
//! scanner and back or a RON scenario file.
use std::time::Duration;

use anyhow::{Context, Result};
use kiosk_core::{ActorId, CredentialSet};
use kiosk_runtime::{
    AnimatorPresentation, DelayedOracle, Runtime, Scenario, StaticCredentialOracle,
};

use crate::config::ClientConfig;

/// Wearable the simulated visitor always has on.
pub const BASELINE_WEARABLE: &str = "urn:decentraland:off-chain:base-avatars:eyebrows_00";

/// Slack after the scripted walk ends so the last transition is visible.
const TAIL: Duration = Duration::from_secs(1);

/// A built runtime together with how long the session should last.
pub struct KioskSetup {
    pub runtime: Runtime,
    pub run_for: Duration,
}

pub async fn bootstrap(config: ClientConfig) -> Result<KioskSetup> {
    let kiosk = &config.runtime.kiosk;
    let sim = &config.simulation;

    let scenario = match &sim.scenario_path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario: {}", path.display()))?,
        None => Scenario::walk_in_and_out(sim.actor.as_str(), kiosk.scanner_position, sim.dwell),
    };

    let visitor = scenario
        .actor
        .clone()
        .unwrap_or_else(|| ActorId::new(sim.actor.as_str()));
    let mut credentials: CredentialSet = [BASELINE_WEARABLE].into_iter().collect();
    if sim.holds_credential {
        credentials.insert(kiosk.required_credential.clone());
    }
    tracing::info!(
        actor = %visitor,
        %credentials,
        latency = ?sim.oracle_latency,
        "simulated credential service ready"
    );
    let mut table = StaticCredentialOracle::new();
    table.insert(visitor, credentials);
    let oracle = DelayedOracle::new(table, sim.oracle_latency);

    let run_for = sim.run_for.unwrap_or_else(|| scenario.duration().saturating_add(TAIL));

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .oracle(oracle)
        .presentation(AnimatorPresentation::kiosk_default())
        .actor(scenario.into_actor())
        .build()
        .await
        .context("Failed to build kiosk runtime")?;

    Ok(KioskSetup { runtime, run_for })
}
