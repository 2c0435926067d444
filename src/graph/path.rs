// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use petgraph::graph::NodeIndex;

use super::{Graph, NodeInfo, NodeOrigin};
use crate::traits::{Transform, TransformRef};

/// Builder handle bound to one position of a [`Graph`].
///
/// `next` appends a node, colors a new edge from the current position to it,
/// and returns a builder for the new position. Calling `next` several times
/// on the same builder creates sibling edges: every sibling is evaluated
/// against the same input when the position is reached.
///
/// The same builder serves both purposes it is needed for: declaring the
/// static pipeline before execution ([`crate::Engine::start`]) and extending
/// the graph from inside a running transform
/// ([`crate::Control::decl_path`]).
///
/// # Example
/// ```
/// use the_thicket::{Control, Engine, EngineConfig, Transform};
///
/// struct Double;
///
/// impl Transform for Double {
///     type In = i64;
///     type Out = i64;
///
///     fn apply(&self, ctrl: &mut Control<'_, i64>, input: &mut i64) -> anyhow::Result<()> {
///         ctrl.emit(*input * 2);
///         Ok(())
///     }
/// }
///
/// let mut engine = Engine::new(EngineConfig::default());
/// engine.start().next(Double).next(Double);
///
/// let results = engine.execute::<i64>(5_i64).unwrap().into_results();
/// assert_eq!(results, vec![20]);
/// ```
#[derive(Debug)]
pub struct PathDecl<'g> {
    graph: &'g mut Graph,
    at: NodeIndex,
}

impl<'g> PathDecl<'g> {
    pub(crate) fn new(graph: &'g mut Graph, at: NodeIndex) -> Self {
        Self { graph, at }
    }

    /// Index of the node this builder is bound to.
    pub fn node(&self) -> NodeIndex {
        self.at
    }

    /// Appends `transform` after the current position.
    pub fn next<T: Transform>(&mut self, transform: T) -> PathDecl<'_> {
        self.next_shared(Arc::new(transform))
    }

    /// Like [`PathDecl::next`], for a transform that is already shared.
    pub fn next_shared(&mut self, transform: TransformRef) -> PathDecl<'_> {
        let to = self.append(transform);
        PathDecl::new(&mut *self.graph, to)
    }

    /// Consuming form of [`PathDecl::next`], handy when building a chain in a
    /// loop.
    pub fn then<T: Transform>(mut self, transform: T) -> PathDecl<'g> {
        let to = self.append(Arc::new(transform));
        PathDecl::new(self.graph, to)
    }

    fn append(&mut self, transform: TransformRef) -> NodeIndex {
        let info = NodeInfo::new(transform.transform_name(), NodeOrigin::Declared);
        let to = self.graph.add_node(info);
        self.graph.add_edge(self.at, to, transform);
        to
    }
}
