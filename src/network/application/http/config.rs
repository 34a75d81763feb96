//! Runtime client configuration.

use super::{DEFAULT_TEARDOWN_TIMEOUT_MS, MIN_PACKET_SIZE};
use crate::network::error::Error;
use serde::{Deserialize, Serialize};

/// Settings applied when a [`Client`](super::Client) is created.
///
/// Every field has a default, so a JSON blob only needs to name the fields
/// it changes:
///
/// ```rust
/// use libiot_web::network::application::http::Config;
///
/// let config = Config::from_json(br#"{"keep_alive":false,"local_port":40000}"#).unwrap();
/// assert!(!config.keep_alive);
/// assert_eq!(config.local_port, Some(40000));
/// assert_eq!(config.min_packet_size, Config::default().min_packet_size);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allow persistent connections. Has no effect without the `keep-alive` feature.
    pub keep_alive: bool,
    /// Fixed local port to bind, or an ephemeral one when `None`.
    pub local_port: Option<u16>,
    /// Smallest pool payload size the client accepts.
    pub min_packet_size: u16,
    /// Wait applied to disconnects the client performs on its own.
    pub teardown_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_alive: true,
            local_port: None,
            min_packet_size: MIN_PACKET_SIZE,
            teardown_timeout_ms: DEFAULT_TEARDOWN_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let (config, _) = serde_json_core::from_slice::<Config>(json).map_err(|_| Error::InvalidParameter)?;
        Ok(config)
    }

    /// Serialize the configuration as JSON into `buf`, returning the length written.
    pub fn to_json(&self, buf: &mut [u8]) -> Result<usize, Error> {
        serde_json_core::to_slice(self, buf).map_err(|_| Error::BufferOverflow)
    }

    pub(crate) fn keep_alive_enabled(&self) -> bool {
        cfg!(feature = "keep-alive") && self.keep_alive
    }
}
