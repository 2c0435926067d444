// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating an engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not map to a known format.
    #[error("Unsupported config format '{extension}', expected one of: yaml, yml, toml, json")]
    UnsupportedFormat { extension: String },

    /// A resource limit was set to a value the scheduler cannot honor.
    #[error("Invalid limit '{name}': must be greater than zero")]
    InvalidLimit { name: &'static str },
}
