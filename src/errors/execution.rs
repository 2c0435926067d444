// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use thiserror::Error;

use super::TypeMismatch;

/// A bounded resource the scheduler watches while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Number of pending work items.
    QueueLength,
    /// Depth of the work item being processed.
    Depth,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::QueueLength => "queue_length",
            Resource::Depth => "depth",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that terminate a whole execution.
///
/// Per-branch problems (a transform rejecting its input, a transform
/// returning an error) never show up here; they are collected as
/// diagnostics and the search carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A resource guard tripped. Nothing found so far is returned; retry with
    /// a larger limit if the search is expected to be that large.
    #[error("Resource exhausted: {resource} reached {observed}, limit is {limit}")]
    ResourceExhausted {
        resource: Resource,
        limit: usize,
        observed: usize,
    },

    /// A value collected as a result is not of the requested output type.
    #[error("Result collected at node '{node}' has the wrong type: {source}")]
    ResultType {
        node: String,
        #[source]
        source: TypeMismatch,
    },

    /// `execute_single` found zero or several results.
    #[error("Expected exactly one result, got {count}")]
    ExpectedSingleResult { count: usize },
}

impl ExecutionError {
    /// True for the resource guard errors, the only ones worth retrying.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, ExecutionError::ResourceExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_exhausted_display() {
        let err = ExecutionError::ResourceExhausted {
            resource: Resource::QueueLength,
            limit: 1000,
            observed: 1001,
        };

        assert_eq!(
            err.to_string(),
            "Resource exhausted: queue_length reached 1001, limit is 1000"
        );
        assert!(err.is_resource_exhausted());
    }

    #[test]
    fn test_result_type_keeps_source() {
        let err = ExecutionError::ResultType {
            node: "ToString".to_string(),
            source: TypeMismatch { expected: "i32", actual: "alloc::string::String" },
        };

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Bad cast, expected i32, but got alloc::string::String");
        assert!(!err.is_resource_exhausted());
    }
}
