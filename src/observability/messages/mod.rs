// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - execution lifecycle and resource guard events
//! * `transform` - rejected inputs, reported errors, failed invocations, extensions
//! * `validation` - configuration validation failures
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_thicket::observability::messages::engine::ExecutionStarted;
//! use the_thicket::observability::messages::StructuredLog;
//!
//! let msg = ExecutionStarted {
//!     node_count: 5,
//!     edge_count: 4,
//!     aggregate_returns: false,
//! };
//!
//! let span = msg.span("execute");
//! let _entered = span.enter();
//! msg.log();
//! ```

use std::fmt::Display;

use tracing::Span;

pub mod engine;
pub mod transform;
pub mod validation;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog: Display {
    /// Emits the message as a `tracing` event.
    fn log(&self);

    /// Opens a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
