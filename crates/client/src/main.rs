//! Kiosk client binary.
//!
//! Runs one simulated kiosk session: a scripted visitor walks up to the
//! scanner, the kiosk checks their credentials against a simulated service,
//! and every transition is logged.
//!
//! # Examples
//!
//! ```bash
//! # Visitor holds the required wearable
//! cargo run -p kiosk-client
//!
//! # Visitor without it, failures deny instead of stalling
//! KIOSK_SIM_HOLDS_CREDENTIAL=false KIOSK_ORACLE_FAILURE=deny cargo run -p kiosk-client
//! ```

use anyhow::Result;
use kiosk_client::{Client, ClientConfig, bootstrap, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env()?;

    // 2. Setup logging
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!("Starting kiosk client");
    tracing::info!(
        scanner = ?config.runtime.kiosk.scanner_position,
        required = %config.runtime.kiosk.required_credential,
        tick_rate_hz = config.runtime.tick_rate_hz,
        on_oracle_failure = %config.runtime.kiosk.on_oracle_failure,
        "kiosk configuration"
    );

    // 3. Build runtime
    let setup = bootstrap(config).await?;
    tracing::info!(run_for = ?setup.run_for, "runtime built, starting session");

    // 4. Run until the session ends
    let status = Client::new(setup.runtime, Some(setup.run_for)).run().await?;

    tracing::info!(phase = %status.phase, "Client shutdown complete");
    Ok(())
}
