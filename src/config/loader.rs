// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::consts::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_QUEUE_LEN};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Runtime switches and limits for an [`crate::Engine`].
///
/// Every field is optional in a config file; missing ones take their default.
///
/// # Fields
/// * `aggregate_returns` - keep searching after a `ret`, collecting every
///   returned value instead of stopping at the first one (default `false`)
/// * `collect_terminal_values` - collect values that reach a node with no
///   outgoing edges (default `true`)
/// * `limits` - resource guards checked on every scheduler step
///
/// # Example
/// ```yaml
/// aggregate_returns: true
/// collect_terminal_values: false
/// limits:
///   max_queue_len: 5000
///   max_depth: 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggregate_returns: bool,
    pub collect_terminal_values: bool,
    pub limits: ResourceLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aggregate_returns: false,
            collect_terminal_values: true,
            limits: ResourceLimits::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_aggregate_returns(mut self, enabled: bool) -> Self {
        self.aggregate_returns = enabled;
        self
    }

    pub fn with_collect_terminal_values(mut self, enabled: bool) -> Self {
        self.collect_terminal_values = enabled;
        self
    }

    pub fn with_max_queue_len(mut self, limit: usize) -> Self {
        self.limits.max_queue_len = Some(limit);
        self
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.limits.max_depth = Some(limit);
        self
    }
}

/// Resource guards. `None` means "use the default".
///
/// `max_queue_len` is compared with the pending count before each work item
/// is popped, so one invocation can overshoot it before the run aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceLimits {
    pub max_queue_len: Option<usize>,
    pub max_depth: Option<usize>,
}

impl ResourceLimits {
    pub fn get_max_queue_len(&self) -> usize {
        self.max_queue_len.unwrap_or(DEFAULT_MAX_QUEUE_LEN)
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

/// Loads an [`EngineConfig`] from `path`, choosing the format from the file
/// extension: `yaml`/`yml`, `toml` or `json`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, &extension)
}

/// Parses `content` in the given format (`yaml`, `yml`, `toml` or `json`).
pub fn parse_config(content: &str, format: &str) -> Result<EngineConfig, ConfigError> {
    match format {
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// [`load_config`] followed by [`validate_config`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let config = load_config(path)?;
    validate_config(&config)?;
    Ok(config)
}
