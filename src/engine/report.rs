// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::engine::control::IssueKind;

/// How an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The work queue drained.
    Completed,
    /// A transform returned a value and `aggregate_returns` was off.
    ShortCircuited,
}

/// A per-branch problem recorded during an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub transform: String,
    pub depth: usize,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {} at depth {}: {}",
            self.kind, self.transform, self.depth, self.message
        )
    }
}

/// Counters collected while the scheduler runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Work items popped from the queue.
    pub items_processed: usize,
    /// Transform invocations, one per (work item, outgoing edge).
    pub invocations: usize,
    /// Invocations that created an extension node.
    pub extensions: usize,
    /// Deepest work item seen.
    pub max_depth: usize,
}

/// The outcome of [`crate::Engine::execute`]: the typed results plus every
/// diagnostic recorded along the way.
///
/// Results are in the order they were found. Diagnostics never abort a run, so
/// an execution can both have results and errors.
#[derive(Debug, Clone)]
pub struct Execution<Out> {
    pub results: Vec<Out>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ExecutionStats,
    pub outcome: Outcome,
}

impl<Out> Execution<Out> {
    pub fn into_results(self) -> Vec<Out> {
        self.results
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn is_short_circuited(&self) -> bool {
        self.outcome == Outcome::ShortCircuited
    }

    /// Diagnostic messages, in the order they were recorded.
    pub fn errors(&self) -> impl Iterator<Item = &str> + '_ {
        self.diagnostics.iter().map(|diag| diag.message.as_str())
    }
}
