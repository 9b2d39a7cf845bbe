use std::path::PathBuf;

use chrono::Duration;
use log::info;
use serde::Deserialize;
use warden_states::State;

use crate::session::AuthPolicy;
use crate::sort::Comparator;
use crate::{Error, Result};

pub const DEFAULT_HIDE_ERROR_DELAY_MS: u64 = 3000;
pub const DEFAULT_NOTIFICATION_DELAY_MS: u64 = 3000;

/// Environment variables, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    warden_hide_error_delay_ms: Option<u64>,
    warden_notification_delay_ms: Option<u64>,
    warden_comparator: Option<Comparator>,
    warden_require_unblocked: Option<bool>,
    warden_seed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// How long a validation error stays visible.
    pub hide_error_delay: Duration,
    /// How long a success notification stays visible.
    pub notification_delay: Duration,
    pub comparator: Comparator,
    pub auth_policy: AuthPolicy,
    /// JSON seed to load instead of the bundled demo data.
    pub seed_path: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            hide_error_delay: millis(DEFAULT_HIDE_ERROR_DELAY_MS),
            notification_delay: millis(DEFAULT_NOTIFICATION_DELAY_MS),
            comparator: Comparator::default(),
            auth_policy: AuthPolicy::default(),
            seed_path: None,
        }
    }
}

impl State for AdminConfig {}

fn millis(ms: u64) -> Duration {
    Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
}

fn delay(name: &str, value: Option<u64>, default: u64) -> Result<Duration> {
    match value {
        Some(0) => Err(Error::Config(format!("{name} must be greater than zero"))),
        Some(ms) => {
            info!("{name} set to {ms}ms");
            Ok(millis(ms))
        }
        None => Ok(millis(default)),
    }
}

impl AdminConfig {
    /// Read `WARDEN_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let raw: RawConfig =
            serde_env::from_iter(vars).map_err(|err| Error::Config(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let RawConfig {
            warden_hide_error_delay_ms,
            warden_notification_delay_ms,
            warden_comparator,
            warden_require_unblocked,
            warden_seed,
        } = raw;

        Ok(Self {
            hide_error_delay: delay(
                "WARDEN_HIDE_ERROR_DELAY_MS",
                warden_hide_error_delay_ms,
                DEFAULT_HIDE_ERROR_DELAY_MS,
            )?,
            notification_delay: delay(
                "WARDEN_NOTIFICATION_DELAY_MS",
                warden_notification_delay_ms,
                DEFAULT_NOTIFICATION_DELAY_MS,
            )?,
            comparator: warden_comparator.unwrap_or_default(),
            auth_policy: AuthPolicy {
                require_unblocked: warden_require_unblocked.unwrap_or(false),
            },
            seed_path: warden_seed
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
