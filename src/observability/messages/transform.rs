// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for single transform invocations.
//!
//! None of these stop an execution: the affected branch is recorded as a
//! diagnostic and the search moves on.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A transform was handed a value of the wrong type.
///
/// # Log Level
/// `warn!` - Branch dropped
///
/// # Example
/// ```
/// use the_thicket::observability::messages::transform::TransformInputRejected;
///
/// let msg = TransformInputRejected {
///     transform: "Stringify",
///     depth: 1,
///     message: "Bad cast, expected i32, but got alloc::string::String",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct TransformInputRejected<'a> {
    pub transform: &'a str,
    pub depth: usize,
    pub message: &'a str,
}

impl Display for TransformInputRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transform '{}' rejected its input at depth {}: {}",
            self.transform, self.depth, self.message
        )
    }
}

impl StructuredLog for TransformInputRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            transform = self.transform,
            depth = self.depth,
            error = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "transform_input_rejected",
            span_name = name,
            transform = self.transform,
            depth = self.depth,
        )
    }
}

/// A transform reported an error through its control object.
///
/// # Log Level
/// `debug!` - Transforms use this for expected dead ends
pub struct TransformErrorReported<'a> {
    pub transform: &'a str,
    pub depth: usize,
    pub message: &'a str,
}

impl Display for TransformErrorReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transform '{}' reported at depth {}: {}",
            self.transform, self.depth, self.message
        )
    }
}

impl StructuredLog for TransformErrorReported<'_> {
    fn log(&self) {
        tracing::debug!(
            transform = self.transform,
            depth = self.depth,
            error = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transform_error_reported",
            span_name = name,
            transform = self.transform,
            depth = self.depth,
        )
    }
}

/// A transform's `apply` returned an error; its effects were discarded.
///
/// # Log Level
/// `warn!` - Branch dropped
pub struct TransformFailed<'a> {
    pub transform: &'a str,
    pub depth: usize,
    pub message: &'a str,
}

impl Display for TransformFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transform '{}' failed at depth {}: {}",
            self.transform, self.depth, self.message
        )
    }
}

impl StructuredLog for TransformFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            transform = self.transform,
            depth = self.depth,
            error = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "transform_failed",
            span_name = name,
            transform = self.transform,
            depth = self.depth,
        )
    }
}

/// A transform attached new stages to the graph while running.
///
/// # Log Level
/// `debug!` - Frequent during recursive searches
pub struct PathExtended<'a> {
    pub transform: &'a str,
    pub depth: usize,
    pub extension: usize,
    pub emitted: usize,
}

impl Display for PathExtended<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transform '{}' extended the graph at depth {}: node #{} receives {} values",
            self.transform, self.depth, self.extension, self.emitted
        )
    }
}

impl StructuredLog for PathExtended<'_> {
    fn log(&self) {
        tracing::debug!(
            transform = self.transform,
            depth = self.depth,
            extension = self.extension,
            emitted = self.emitted,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "path_extended",
            span_name = name,
            transform = self.transform,
            depth = self.depth,
            extension = self.extension,
        )
    }
}
