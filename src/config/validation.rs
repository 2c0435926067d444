// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of engine configurations.
//!
//! A limit of zero would make the scheduler abort on its very first step, so
//! it is refused up front instead of surfacing as a confusing
//! `ResourceExhausted` at run time.

use crate::config::loader::EngineConfig;
use crate::errors::ConfigError;
use crate::observability::messages::validation::InvalidLimitRejected;
use crate::observability::messages::StructuredLog;

/// Checks every configured limit is usable.
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let limits = [
        ("max_queue_len", config.limits.max_queue_len),
        ("max_depth", config.limits.max_depth),
    ];

    for (name, limit) in limits {
        if limit == Some(0) {
            InvalidLimitRejected { name }.log();
            return Err(ConfigError::InvalidLimit { name });
        }
    }

    Ok(())
}
