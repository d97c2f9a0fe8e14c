//! Gateway and load settings
//!
//! Settings are plain values passed to the clients and scenarios that need
//! them. [`GatewayConfig::from_env`] reads them from the process environment
//! (after loading a `.env` file if one exists):
//!
//! | Variable               | Default                  |
//! |------------------------|--------------------------|
//! | `GATEWAY_HTTP_URL`     | `http://localhost:8003`  |
//! | `GATEWAY_HTTP_TIMEOUT` | `100s`                   |
//! | `GATEWAY_GRPC_URL`     | `http://localhost:9003`  |
//! | `GATEWAY_GRPC_TIMEOUT` | `100s`                   |
//! | `SEEDS_DUMPS_DIR`      | `dumps`                  |
//! | `LOAD_WAIT_TIME_MIN`   | `1s`                     |
//! | `LOAD_WAIT_TIME_MAX`   | `3s`                     |
use bankload_core::{InvalidWaitTime, WaitTime, DEFAULT_WAIT_TIME_MAX, DEFAULT_WAIT_TIME_MIN};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_URL: &str = "http://localhost:8003";
const DEFAULT_GRPC_URL: &str = "http://localhost:9003";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
const DEFAULT_DUMPS_DIR: &str = "dumps";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error(transparent)]
    WaitTime(#[from] InvalidWaitTime),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub url: Url,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrpcClientConfig {
    pub url: Url,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub http: HttpClientConfig,
    pub grpc: GrpcClientConfig,
    /// Directory seed dumps are written to and read from.
    pub dumps_dir: PathBuf,
    /// Default pause between two tasks of a virtual user.
    pub wait_time: WaitTime,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig {
                url: default_url(DEFAULT_HTTP_URL),
                timeout: DEFAULT_TIMEOUT,
            },
            grpc: GrpcClientConfig {
                url: default_url(DEFAULT_GRPC_URL),
                timeout: DEFAULT_TIMEOUT,
            },
            dumps_dir: PathBuf::from(DEFAULT_DUMPS_DIR),
            wait_time: WaitTime::default(),
        }
    }
}

impl GatewayConfig {
    /// Loads settings from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let wait_time_min = optional_duration(&lookup, "LOAD_WAIT_TIME_MIN")?
            .unwrap_or(DEFAULT_WAIT_TIME_MIN);
        let wait_time_max = optional_duration(&lookup, "LOAD_WAIT_TIME_MAX")?
            .unwrap_or(DEFAULT_WAIT_TIME_MAX);

        Ok(Self {
            http: HttpClientConfig {
                url: optional_parsed(&lookup, "GATEWAY_HTTP_URL")?.unwrap_or(defaults.http.url),
                timeout: optional_duration(&lookup, "GATEWAY_HTTP_TIMEOUT")?
                    .unwrap_or(defaults.http.timeout),
            },
            grpc: GrpcClientConfig {
                url: optional_parsed(&lookup, "GATEWAY_GRPC_URL")?.unwrap_or(defaults.grpc.url),
                timeout: optional_duration(&lookup, "GATEWAY_GRPC_TIMEOUT")?
                    .unwrap_or(defaults.grpc.timeout),
            },
            dumps_dir: lookup("SEEDS_DUMPS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dumps_dir),
            wait_time: WaitTime::between(wait_time_min, wait_time_max)?,
        })
    }
}

fn default_url(url: &str) -> Url {
    Url::parse(url).unwrap_or_else(|err| panic!("Default url {url} is invalid: {err}"))
}

fn optional_parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
                key,
                message: err.to_string(),
            })
        })
        .transpose()
}

fn optional_duration<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            humantime::parse_duration(&value).map_err(|err| ConfigError::InvalidValue {
                key,
                message: err.to_string(),
            })
        })
        .transpose()
}
