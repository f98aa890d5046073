/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::ImmichError;
use crate::logging::GlobalLogger;
use log::{LevelFilter, Log};
use std::sync::Arc;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "IMMICH_BASE_URL";
pub const ENV_API_KEY: &str = "IMMICH_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "IMMICH_TIMEOUT_SECS";

/// Settings used to build a [`crate::Client`].
///
/// Only the base url and API key are required. Without a timeout the transport defaults
/// apply, and retries are off unless asked for. Retries only ever apply to GET requests
/// that failed at the transport level.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) get_retries: u32,
    pub(crate) log_level: LevelFilter,
    pub(crate) logger: Arc<dyn Log>,
}

impl ClientConfig {
    /// Root url of the server (e.g. `https://immich.mydomain.com`) and the API key to use
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: None,
            get_retries: 0,
            log_level: LevelFilter::Trace,
            logger: Arc::new(GlobalLogger),
        }
    }

    /// Reads `IMMICH_BASE_URL`, `IMMICH_API_KEY` and the optional `IMMICH_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ImmichError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ImmichError> {
        let required = |name: &str| {
            var(name).ok_or_else(|| ImmichError::Config(format!("{name} is not set")))
        };
        let base_url = required(ENV_BASE_URL)?;
        let api_key = required(ENV_API_KEY)?;

        let mut config = Self::new(&base_url, &api_key);
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            let secs = secs.parse::<u64>().map_err(|_| {
                ImmichError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {secs}"))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn get_retries(mut self, retries: u32) -> Self {
        self.get_retries = retries;
        self
    }

    /// Most verbose level the client will emit. `LevelFilter::Off` silences it.
    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Sends client log records to `logger` instead of the process wide logger
    pub fn logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"xxx")
            .field("timeout", &self.timeout)
            .field("get_retries", &self.get_retries)
            .field("log_level", &self.log_level)
            .finish()
    }
}
