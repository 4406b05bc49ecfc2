//! Configuration loading and management
//!
//! Configuration is built once at startup and handed to constructors
//! explicitly; nothing reads it from global state afterwards.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Errors raised while validating a configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting '{0}'")]
    Missing(&'static str),

    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Settings for the order service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Table holding the orders
    pub table_name: String,

    /// Reserved for an external status-notification topic; parsed and
    /// validated but not read by any publisher yet
    #[serde(default)]
    pub status_topic: Option<String>,

    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Capacity of the in-process event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl ServiceConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            status_topic: None,
            listen_addr: default_listen_addr(),
            event_capacity: default_event_capacity(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// - `TABLE_NAME` (required)
    /// - `ORDER_STATUS_UPDATE_TOPIC`
    /// - `LISTEN_ADDR`
    /// - `EVENT_CAPACITY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup("TABLE_NAME").ok_or(ConfigError::Missing("TABLE_NAME"))?;

        let event_capacity = match lookup("EVENT_CAPACITY") {
            Some(raw) => raw.parse::<usize>().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    field: "EVENT_CAPACITY",
                    message: e.to_string(),
                }
            })?,
            None => default_event_capacity(),
        };

        let config = Self {
            table_name,
            status_topic: lookup("ORDER_STATUS_UPDATE_TOPIC").filter(|topic| !topic.is_empty()),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr),
            event_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that cannot be expressed in the type
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Missing("table_name"));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "event_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
