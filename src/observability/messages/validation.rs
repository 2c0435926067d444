// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A resource limit was configured as zero.
///
/// # Log Level
/// `error!` - The configuration is refused
///
/// # Example
/// ```
/// use the_thicket::observability::messages::validation::InvalidLimitRejected;
///
/// let msg = InvalidLimitRejected { name: "max_depth" };
/// assert_eq!(msg.to_string(), "Configuration rejected: limit 'max_depth' must be greater than zero");
/// ```
pub struct InvalidLimitRejected<'a> {
    pub name: &'a str,
}

impl Display for InvalidLimitRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration rejected: limit '{}' must be greater than zero",
            self.name
        )
    }
}

impl StructuredLog for InvalidLimitRejected<'_> {
    fn log(&self) {
        tracing::error!(limit = self.name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("invalid_limit_rejected", span_name = name, limit = self.name)
    }
}
