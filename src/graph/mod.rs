// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Arena graph holding the static pipeline and every dynamic extension.
//!
//! The [`Graph`] is the sole owner of its nodes and edges. Nodes and edges
//! refer to each other by index, never by ownership, so the structure can
//! alias freely without reference cycles. The graph only grows: nothing is
//! ever removed, which keeps every index handed out valid for the lifetime of
//! the graph.
//!
//! Each edge is colored with the transform that runs when the edge is
//! traversed. The coloring is the edge weight, so an uncolored edge cannot
//! exist.
//!
//! ```text
//! head --[ToString]--> ToString --[AllPermutations]--> AllPermutations
//!                          \
//!                           `--[Reverse]--> Reverse      (sibling edge: OR-branch)
//! ```

mod path;

use std::fmt;
use std::sync::Arc;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::errors::GraphError;
use crate::traits::TransformRef;

pub use path::PathDecl;
pub use petgraph::graph::{EdgeIndex, NodeIndex};

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrigin {
    /// The entry point of every execution.
    Head,
    /// Created by a [`PathDecl`] chain.
    Declared,
    /// Auxiliary node created by a running transform at the given depth.
    Extension { depth: usize },
}

/// Per-node data: a debug name and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    name: String,
    origin: NodeOrigin,
}

impl NodeInfo {
    pub fn new(name: impl Into<String>, origin: NodeOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> NodeOrigin {
        self.origin
    }
}

/// The transform attached to an edge.
#[derive(Clone)]
pub struct EdgeColoring {
    transform: TransformRef,
}

impl EdgeColoring {
    pub fn new(transform: TransformRef) -> Self {
        Self { transform }
    }

    pub fn transform(&self) -> &TransformRef {
        &self.transform
    }

    pub fn name(&self) -> &str {
        self.transform.transform_name()
    }
}

impl fmt::Debug for EdgeColoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeColoring")
            .field("transform", &self.name())
            .field("input_type", &self.transform.input_type().name())
            .field("output_type", &self.transform.output_type().name())
            .finish()
    }
}

/// An outgoing edge resolved for evaluation.
#[derive(Clone)]
pub struct OutEdge {
    pub id: EdgeIndex,
    pub target: NodeIndex,
    pub transform: TransformRef,
}

/// Directed, append-only graph of transforms.
pub struct Graph {
    inner: DiGraph<NodeInfo, EdgeColoring>,
    head: NodeIndex,
}

impl Graph {
    /// Creates a graph holding only its head node.
    pub fn new() -> Self {
        let mut inner = DiGraph::new();
        let head = inner.add_node(NodeInfo::new("head", NodeOrigin::Head));
        Self { inner, head }
    }

    pub fn head(&self) -> NodeIndex {
        self.head
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.inner.node_weight(node).is_some()
    }

    pub fn node(&self, node: NodeIndex) -> Option<&NodeInfo> {
        self.inner.node_weight(node)
    }

    /// Debug name of `node`, or `"?"` for a foreign index.
    pub fn node_name(&self, node: NodeIndex) -> &str {
        self.node(node).map_or("?", NodeInfo::name)
    }

    pub fn coloring(&self, edge: EdgeIndex) -> Option<&EdgeColoring> {
        self.inner.edge_weight(edge)
    }

    pub fn endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.inner.edge_endpoints(edge)
    }

    /// A node with no outgoing edges.
    pub fn is_terminal(&self, node: NodeIndex) -> bool {
        self.inner
            .edges_directed(node, Direction::Outgoing)
            .next()
            .is_none()
    }

    /// Outgoing edges of `node` in declaration order.
    pub fn outgoing(&self, node: NodeIndex) -> Vec<OutEdge> {
        let mut edges: Vec<OutEdge> = self
            .inner
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| OutEdge {
                id: edge.id(),
                target: edge.target(),
                transform: Arc::clone(edge.weight().transform()),
            })
            .collect();
        edges.sort_by_key(|edge| edge.id.index());
        edges
    }

    /// Incoming edges of `node` in declaration order. Diagnostics only: the
    /// scheduler never walks backwards.
    pub fn incoming(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .inner
            .edges_directed(node, Direction::Incoming)
            .map(|edge| edge.id())
            .collect();
        edges.sort_by_key(|edge| edge.index());
        edges
    }

    /// Builder bound to an existing node, for attaching more stages to it.
    pub fn path_from(&mut self, node: NodeIndex) -> Result<PathDecl<'_>, GraphError> {
        if !self.contains_node(node) {
            return Err(GraphError::UnknownNode {
                node,
                node_count: self.node_count(),
            });
        }
        Ok(PathDecl::new(self, node))
    }

    pub(crate) fn add_node(&mut self, info: NodeInfo) -> NodeIndex {
        self.inner.add_node(info)
    }

    pub(crate) fn add_extension_node(&mut self, depth: usize) -> NodeIndex {
        self.add_node(NodeInfo::new(
            format!("extension@{}", depth),
            NodeOrigin::Extension { depth },
        ))
    }

    // Both endpoints come from this graph: callers only pass indices handed
    // out by `add_node` or validated by `path_from`.
    pub(crate) fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        transform: TransformRef,
    ) -> EdgeIndex {
        self.inner.add_edge(from, to, EdgeColoring::new(transform))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("head", &self.head)
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

/// One line per edge: `from#i --[transform]--> to#j`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.inner.edge_references() {
            writeln!(
                f,
                "{}#{} --[{}]--> {}#{}",
                self.node_name(edge.source()),
                edge.source().index(),
                edge.weight().name(),
                self.node_name(edge.target()),
                edge.target().index(),
            )?;
        }
        Ok(())
    }
}
