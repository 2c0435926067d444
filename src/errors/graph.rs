// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use petgraph::graph::NodeIndex;
use thiserror::Error;

/// Errors raised while building a graph by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The index does not name a node of this graph.
    #[error("Node {} does not belong to this graph ({node_count} nodes)", .node.index())]
    UnknownNode { node: NodeIndex, node_count: usize },
}
