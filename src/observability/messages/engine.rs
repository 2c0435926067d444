// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the execution lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Execution start, completion and short-circuit
//! * Resource guards tripping
//! * Values collected at terminal nodes

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_thicket::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     node_count: 4,
///     edge_count: 3,
///     aggregate_returns: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted {
    pub node_count: usize,
    pub edge_count: usize,
    pub aggregate_returns: bool,
}

impl Display for ExecutionStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting execution: {} nodes, {} edges, aggregate_returns={}",
            self.node_count, self.edge_count, self.aggregate_returns
        )
    }
}

impl StructuredLog for ExecutionStarted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            edge_count = self.edge_count,
            aggregate_returns = self.aggregate_returns,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            node_count = self.node_count,
            edge_count = self.edge_count,
            aggregate_returns = self.aggregate_returns,
        )
    }
}

/// Execution drained its queue.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionCompleted {
    pub result_count: usize,
    pub items_processed: usize,
    pub diagnostic_count: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution completed: {} results from {} work items, {} diagnostics in {:?}",
            self.result_count, self.items_processed, self.diagnostic_count, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted {
    fn log(&self) {
        tracing::info!(
            result_count = self.result_count,
            items_processed = self.items_processed,
            diagnostic_count = self.diagnostic_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            result_count = self.result_count,
            items_processed = self.items_processed,
            duration = ?self.duration,
        )
    }
}

/// Execution stopped at the first returned value.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionShortCircuited<'a> {
    pub transform: &'a str,
    pub depth: usize,
    pub pending: usize,
}

impl Display for ExecutionShortCircuited<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution short-circuited by '{}' at depth {}, {} work items left unexplored",
            self.transform, self.depth, self.pending
        )
    }
}

impl StructuredLog for ExecutionShortCircuited<'_> {
    fn log(&self) {
        tracing::info!(
            transform = self.transform,
            depth = self.depth,
            pending = self.pending,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_short_circuited",
            span_name = name,
            transform = self.transform,
            depth = self.depth,
        )
    }
}

/// A resource guard aborted the execution.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_thicket::observability::messages::engine::ResourceLimitExceeded;
///
/// let msg = ResourceLimitExceeded {
///     resource: "queue_length",
///     limit: 1000,
///     observed: 1001,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Resource limit exceeded: queue_length is 1001, limit is 1000"
/// );
/// ```
pub struct ResourceLimitExceeded<'a> {
    pub resource: &'a str,
    pub limit: usize,
    pub observed: usize,
}

impl Display for ResourceLimitExceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resource limit exceeded: {} is {}, limit is {}",
            self.resource, self.observed, self.limit
        )
    }
}

impl StructuredLog for ResourceLimitExceeded<'_> {
    fn log(&self) {
        tracing::error!(
            resource = self.resource,
            limit = self.limit,
            observed = self.observed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "resource_limit_exceeded",
            span_name = name,
            resource = self.resource,
            limit = self.limit,
            observed = self.observed,
        )
    }
}

/// A value reached a node with no outgoing edges.
///
/// # Log Level
/// `trace!` - Fires once per result
pub struct TerminalValueReached<'a> {
    pub node: &'a str,
    pub depth: usize,
    pub value: &'a dyn std::fmt::Debug,
}

impl Display for TerminalValueReached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Value {:?} reached terminal node '{}' at depth {}",
            self.value, self.node, self.depth
        )
    }
}

impl StructuredLog for TerminalValueReached<'_> {
    fn log(&self) {
        tracing::trace!(
            node = self.node,
            depth = self.depth,
            value = ?self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "terminal_value_reached",
            span_name = name,
            node = self.node,
            depth = self.depth,
        )
    }
}
