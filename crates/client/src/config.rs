//! Client configuration loaded from the process environment.
//!
//! Every knob has a default so the binary runs with no environment at all.
//! A RON file named by `KIOSK_CONFIG` replaces the kiosk defaults, and the
//! individual variables below override single fields on top of it.
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use kiosk_core::{KioskConfig, OracleFailurePolicy};
use kiosk_runtime::RuntimeConfig;

pub const ENV_CONFIG: &str = "KIOSK_CONFIG";
pub const ENV_TICK_HZ: &str = "KIOSK_TICK_HZ";
pub const ENV_ORACLE_TIMEOUT_MS: &str = "KIOSK_ORACLE_TIMEOUT_MS";
pub const ENV_ORACLE_FAILURE: &str = "KIOSK_ORACLE_FAILURE";
pub const ENV_SESSION_ID: &str = "KIOSK_SESSION_ID";
pub const ENV_SIM_ACTOR: &str = "KIOSK_SIM_ACTOR";
pub const ENV_SIM_HOLDS_CREDENTIAL: &str = "KIOSK_SIM_HOLDS_CREDENTIAL";
pub const ENV_SIM_LATENCY_MS: &str = "KIOSK_SIM_LATENCY_MS";
pub const ENV_SIM_SCENARIO: &str = "KIOSK_SIM_SCENARIO";
pub const ENV_SIM_DWELL_SECS: &str = "KIOSK_SIM_DWELL_SECS";
pub const ENV_SIM_SECONDS: &str = "KIOSK_SIM_SECONDS";

/// Settings for the simulated visitor driven by the demo binary.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub actor: String,
    /// Whether the simulated oracle reports the required credential.
    pub holds_credential: bool,
    pub oracle_latency: Duration,
    /// RON scenario to replay instead of the built-in walk.
    pub scenario_path: Option<PathBuf>,
    /// Time spent standing at the scanner in the built-in walk.
    pub dwell: Duration,
    /// Overrides how long the client runs before shutting down.
    pub run_for: Option<Duration>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            actor: "visitor".to_string(),
            holds_credential: true,
            oracle_latency: Duration::from_millis(250),
            scenario_path: None,
            dwell: Duration::from_secs(6),
            run_for: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    pub session_id: Option<String>,
    pub simulation: SimulationConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_CONFIG) {
            config.runtime.kiosk = load_kiosk_config(Path::new(&path))?;
        }

        if let Some(hz) = parse_var::<u32, _>(&lookup, ENV_TICK_HZ)? {
            config.runtime.tick_rate_hz = hz;
        }

        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_ORACLE_TIMEOUT_MS)? {
            // Zero disables the bound.
            config.runtime.oracle_timeout = (ms > 0).then_some(Duration::from_millis(ms));
        }

        if let Some(policy) = parse_var::<OracleFailurePolicy, _>(&lookup, ENV_ORACLE_FAILURE)? {
            config.runtime.kiosk.on_oracle_failure = policy;
        }

        config.session_id = lookup(ENV_SESSION_ID).filter(|id| !id.is_empty());

        let sim = &mut config.simulation;
        if let Some(actor) = lookup(ENV_SIM_ACTOR).filter(|id| !id.is_empty()) {
            sim.actor = actor;
        }
        if let Some(holds) = parse_var::<bool, _>(&lookup, ENV_SIM_HOLDS_CREDENTIAL)? {
            sim.holds_credential = holds;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_SIM_LATENCY_MS)? {
            sim.oracle_latency = Duration::from_millis(ms);
        }
        sim.scenario_path = lookup(ENV_SIM_SCENARIO).map(PathBuf::from);
        if let Some(secs) = parse_var::<f32, _>(&lookup, ENV_SIM_DWELL_SECS)? {
            sim.dwell = Duration::try_from_secs_f32(secs)
                .with_context(|| format!("{ENV_SIM_DWELL_SECS} must be a non-negative number"))?;
        }
        if let Some(secs) = parse_var::<f32, _>(&lookup, ENV_SIM_SECONDS)? {
            sim.run_for = Some(
                Duration::try_from_secs_f32(secs)
                    .with_context(|| format!("{ENV_SIM_SECONDS} must be a non-negative number"))?,
            );
        }

        config.runtime.kiosk.validate()?;
        Ok(config)
    }
}

/// Read a [`KioskConfig`] from a RON file. Missing fields keep their defaults.
pub fn load_kiosk_config(path: &Path) -> Result<KioskConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read kiosk config: {}", path.display()))?;
    let config: KioskConfig = ron::from_str(&source)
        .with_context(|| format!("Failed to parse kiosk config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid kiosk config: {}", path.display()))?;
    Ok(config)
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|err| anyhow::anyhow!("{key}={raw:?} is invalid: {err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::Vec3;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.runtime.kiosk.check_delay, Duration::from_secs(3));
    }

    #[test]
    fn variables_override_fields() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_TICK_HZ, "60"),
            (ENV_ORACLE_TIMEOUT_MS, "1500"),
            (ENV_ORACLE_FAILURE, "Deny"),
            (ENV_SESSION_ID, "lobby"),
            (ENV_SIM_HOLDS_CREDENTIAL, "false"),
            (ENV_SIM_SECONDS, "4.5"),
        ]))
        .unwrap();

        assert_eq!(config.runtime.tick_rate_hz, 60);
        assert_eq!(
            config.runtime.oracle_timeout,
            Some(Duration::from_millis(1500))
        );
        assert_eq!(
            config.runtime.kiosk.on_oracle_failure,
            OracleFailurePolicy::Deny
        );
        assert_eq!(config.session_id.as_deref(), Some("lobby"));
        assert!(!config.simulation.holds_credential);
        assert_eq!(config.simulation.run_for, Some(Duration::from_millis(4500)));
    }

    #[test]
    fn zero_timeout_disables_the_bound() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_ORACLE_TIMEOUT_MS, "0")])).unwrap();
        assert_eq!(config.runtime.oracle_timeout, None);
    }

    #[test]
    fn unknown_failure_policy_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_ORACLE_FAILURE, "retry")])).unwrap_err();
        assert!(err.to_string().contains(ENV_ORACLE_FAILURE));
    }

    #[test]
    fn failure_policy_parses_case_insensitively() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_ORACLE_FAILURE, "STALL")])).unwrap();
        assert_eq!(
            config.runtime.kiosk.on_oracle_failure,
            OracleFailurePolicy::Stall
        );
    }

    #[test]
    fn malformed_variable_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TICK_HZ, "fast")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TICK_HZ));
    }

    #[test]
    fn kiosk_config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "(scanner_position: (x: 1.0, y: 0.0, z: 2.0), near_threshold: 3.0, on_oracle_failure: deny)"
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = ClientConfig::from_lookup(lookup(&[(ENV_CONFIG, path.as_str())])).unwrap();
        let kiosk = &config.runtime.kiosk;

        assert_eq!(kiosk.scanner_position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(kiosk.near_threshold, 3.0);
        assert_eq!(kiosk.far_threshold, KioskConfig::DEFAULT_FAR_THRESHOLD);
        assert_eq!(kiosk.on_oracle_failure, OracleFailurePolicy::Deny);
    }

    #[test]
    fn invalid_kiosk_config_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(near_threshold: -1.0)").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        assert!(ClientConfig::from_lookup(lookup(&[(ENV_CONFIG, path.as_str())])).is_err());
    }

    #[test]
    fn missing_kiosk_config_file_is_reported() {
        let err = load_kiosk_config(Path::new("/nonexistent/kiosk.ron")).unwrap_err();
        assert!(err.to_string().contains("Failed to read kiosk config"));
    }
}
