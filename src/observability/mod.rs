// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the engine.
//!
//! Every diagnostic and operational event is a message struct under
//! [`messages`], implementing `Display` for the human-readable line and
//! [`messages::StructuredLog`] for the `tracing` event with its fields.
//! Keeping the text in one place avoids magic strings in the scheduler.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - execution lifecycle and resource guards
//! * `messages::transform` - per-invocation problems and graph extension
//! * `messages::validation` - configuration checks
//!
//! # Usage
//!
//! ```rust
//! use the_thicket::observability::messages::transform::TransformFailed;
//! use the_thicket::observability::messages::StructuredLog;
//!
//! let msg = TransformFailed {
//!     transform: "ParseNumber",
//!     depth: 2,
//!     message: "invalid digit found in string",
//! };
//!
//! msg.log();
//! ```

pub mod messages;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Calling it again, or after another subscriber was installed, is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
