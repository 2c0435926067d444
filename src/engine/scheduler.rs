// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The search loop.
//!
//! [`Engine`] owns the graph and drives a [`PriorityWorkQueue`] of values
//! waiting at nodes. Each step pops the deepest pending item and either
//! collects it (terminal node) or pushes it through every outgoing edge of its
//! node, in declaration order.
//!
//! ```text
//!   pop ──► guards ──► terminal? ──yes──► collect as result
//!                         │
//!                         no
//!                         ▼
//!               for each outgoing edge:
//!                 invoke ──► record diagnostics
//!                   │
//!                   ├─ ret(v) ──► aggregate? append v : stop with [v]
//!                   └─ emitted ──► push at depth + 1 to the extension node
//!                                  if one was declared, else the edge target
//! ```
//!
//! The queue-length guard is checked before each pop, not on each push: a
//! single invocation may emit any number of values, and the run aborts on
//! the next step with the full pending count as `observed`.
//!
//! The run ends when the queue drains, when a return short-circuits it, or
//! when a resource guard trips. Guards fail the whole run; per-branch problems
//! only ever become [`Diagnostic`]s.

use std::time::Instant;

use petgraph::graph::NodeIndex;

use crate::config::EngineConfig;
use crate::engine::control::{Effects, IssueKind};
use crate::engine::report::{Diagnostic, Execution, ExecutionStats, Outcome};
use crate::engine::work_queue::{PriorityWorkQueue, WorkItem};
use crate::errors::{ExecutionError, Resource};
use crate::graph::{Graph, OutEdge, PathDecl};
use crate::observability::messages::engine::{
    ExecutionCompleted, ExecutionShortCircuited, ExecutionStarted, ResourceLimitExceeded,
    TerminalValueReached,
};
use crate::observability::messages::transform::{
    PathExtended, TransformErrorReported, TransformFailed, TransformInputRejected,
};
use crate::observability::messages::StructuredLog;
use crate::value::{Payload, Value};

/// Owns a transform graph and runs searches over it.
///
/// The graph persists across executions: extension nodes created by one run
/// stay in the graph, unreachable from the head, and do not affect later runs.
/// The graph never shrinks, so a long-lived engine running transforms that
/// call [`crate::Control::decl_path`] grows by one node per such invocation
/// (plus the stages declared on it) on every execution. Build a fresh engine
/// per search when that matters.
#[derive(Debug, Default)]
pub struct Engine {
    graph: Graph,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
        }
    }

    /// Builder bound to the head node, for declaring the static pipeline.
    pub fn start(&mut self) -> PathDecl<'_> {
        let head = self.graph.head();
        PathDecl::new(&mut self.graph, head)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for re-binding builders with [`Graph::path_from`].
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a search starting from `initial` at the head node and collects
    /// results of type `Out`.
    pub fn execute<Out: Payload>(
        &mut self,
        initial: impl Payload,
    ) -> Result<Execution<Out>, ExecutionError> {
        self.execute_value(Value::new(initial))
    }

    /// [`Engine::execute`] for an already erased initial value.
    pub fn execute_value<Out: Payload>(
        &mut self,
        initial: Value,
    ) -> Result<Execution<Out>, ExecutionError> {
        let started = ExecutionStarted {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            aggregate_returns: self.config.aggregate_returns,
        };
        let span = started.span("execute");
        let _entered = span.enter();
        started.log();

        let clock = Instant::now();
        let mut run = Run::<Out>::new(&self.config);
        run.queue.push(WorkItem::new(self.graph.head(), initial, 0));

        while let Some(item) = run.next_item()? {
            if self.graph.is_terminal(item.node) {
                run.collect_terminal(&self.graph, item)?;
                continue;
            }

            for edge in self.graph.outgoing(item.node) {
                let effects = edge.transform.invoke(&mut self.graph, &item.value, item.depth);
                if let Some(returned) = run.absorb(&self.graph, &edge, &item, effects)? {
                    ExecutionShortCircuited {
                        transform: edge.transform.transform_name(),
                        depth: item.depth,
                        pending: run.queue.len(),
                    }
                    .log();
                    return Ok(run.finish(vec![returned], Outcome::ShortCircuited));
                }
            }
        }

        let results = std::mem::take(&mut run.results);
        let execution = run.finish(results, Outcome::Completed);
        ExecutionCompleted {
            result_count: execution.results.len(),
            items_processed: execution.stats.items_processed,
            diagnostic_count: execution.diagnostics.len(),
            duration: clock.elapsed(),
        }
        .log();
        Ok(execution)
    }

    /// Runs a search that must produce exactly one result.
    pub fn execute_single<Out: Payload>(
        &mut self,
        initial: impl Payload,
    ) -> Result<Out, ExecutionError> {
        let mut results = self.execute::<Out>(initial)?.into_results();
        match results.len() {
            1 => results.pop().ok_or(ExecutionError::ExpectedSingleResult { count: 0 }),
            count => Err(ExecutionError::ExpectedSingleResult { count }),
        }
    }
}

/// State of one execution.
struct Run<Out> {
    queue: PriorityWorkQueue,
    results: Vec<Out>,
    diagnostics: Vec<Diagnostic>,
    stats: ExecutionStats,
    max_queue_len: usize,
    max_depth: usize,
    aggregate_returns: bool,
    collect_terminal_values: bool,
}

impl<Out: Payload> Run<Out> {
    fn new(config: &EngineConfig) -> Self {
        Self {
            queue: PriorityWorkQueue::new(),
            results: Vec::new(),
            diagnostics: Vec::new(),
            stats: ExecutionStats::default(),
            max_queue_len: config.limits.get_max_queue_len(),
            max_depth: config.limits.get_max_depth(),
            aggregate_returns: config.aggregate_returns,
            collect_terminal_values: config.collect_terminal_values,
        }
    }

    /// Pops the next item, enforcing both resource guards.
    fn next_item(&mut self) -> Result<Option<WorkItem>, ExecutionError> {
        let pending = self.queue.len();
        if pending > self.max_queue_len {
            return Err(exhausted(Resource::QueueLength, self.max_queue_len, pending));
        }

        let Some(item) = self.queue.pop() else {
            return Ok(None);
        };
        if item.depth > self.max_depth {
            return Err(exhausted(Resource::Depth, self.max_depth, item.depth));
        }

        self.stats.items_processed += 1;
        self.stats.max_depth = self.stats.max_depth.max(item.depth);
        Ok(Some(item))
    }

    fn collect_terminal(&mut self, graph: &Graph, item: WorkItem) -> Result<(), ExecutionError> {
        if !self.collect_terminal_values {
            return Ok(());
        }

        TerminalValueReached {
            node: graph.node_name(item.node),
            depth: item.depth,
            value: &item.value,
        }
        .log();
        let result = typed_result(graph, item.node, item.value)?;
        self.results.push(result);
        Ok(())
    }

    /// Folds one invocation's effects into the run. Returns the value that
    /// short-circuits the execution, if any.
    fn absorb(
        &mut self,
        graph: &Graph,
        edge: &OutEdge,
        item: &WorkItem,
        effects: Effects,
    ) -> Result<Option<Out>, ExecutionError> {
        let name = edge.transform.transform_name();
        self.stats.invocations += 1;

        for issue in effects.issues {
            log_issue(name, item.depth, issue.kind, &issue.message);
            self.diagnostics.push(Diagnostic {
                transform: name.to_string(),
                depth: item.depth,
                kind: issue.kind,
                message: issue.message,
            });
        }

        if let Some(returned) = effects.returned {
            let value = typed_result(graph, edge.target, returned)?;
            if !self.aggregate_returns {
                return Ok(Some(value));
            }
            self.results.push(value);
            return Ok(None);
        }

        let destination = match effects.extension {
            Some(extension) => {
                self.stats.extensions += 1;
                PathExtended {
                    transform: name,
                    depth: item.depth,
                    extension: extension.index(),
                    emitted: effects.emitted.len(),
                }
                .log();
                extension
            }
            None => edge.target,
        };

        let depth = item.depth + 1;
        self.queue.extend(
            effects
                .emitted
                .into_iter()
                .map(|value| WorkItem::new(destination, value, depth)),
        );
        Ok(None)
    }

    fn finish(self, results: Vec<Out>, outcome: Outcome) -> Execution<Out> {
        Execution {
            results,
            diagnostics: self.diagnostics,
            stats: self.stats,
            outcome,
        }
    }
}

fn typed_result<Out: Payload>(
    graph: &Graph,
    node: NodeIndex,
    value: Value,
) -> Result<Out, ExecutionError> {
    value.take::<Out>().map_err(|source| ExecutionError::ResultType {
        node: graph.node_name(node).to_string(),
        source,
    })
}

fn exhausted(resource: Resource, limit: usize, observed: usize) -> ExecutionError {
    ResourceLimitExceeded {
        resource: resource.as_str(),
        limit,
        observed,
    }
    .log();
    ExecutionError::ResourceExhausted {
        resource,
        limit,
        observed,
    }
}

fn log_issue(transform: &str, depth: usize, kind: IssueKind, message: &str) {
    match kind {
        IssueKind::Rejected => TransformInputRejected {
            transform,
            depth,
            message,
        }
        .log(),
        IssueKind::Reported => TransformErrorReported {
            transform,
            depth,
            message,
        }
        .log(),
        IssueKind::Failed => TransformFailed {
            transform,
            depth,
            message,
        }
        .log(),
    }
}
