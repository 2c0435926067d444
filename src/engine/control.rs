// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-invocation effect surface handed to [`crate::Transform::apply`].
//!
//! A [`Control`] lives for exactly one invocation: one transform evaluated
//! against one work item. Everything the invocation does that the scheduler
//! can observe goes through it, and when the invocation ends the Control is
//! drained into an explicit [`Effects`] record:
//!
//! | call            | effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | `emit(v)`       | `v` continues downstream (many calls = fan-out)         |
//! | `pass()`        | the input continues downstream unchanged                |
//! | `error(msg)`    | a diagnostic is recorded, emission is unaffected        |
//! | `decl_path()`   | emissions are routed to a fresh extension node instead  |
//! | `ret(v)`        | `v` is a finished result, emissions are ignored         |

use std::marker::PhantomData;

use petgraph::graph::NodeIndex;

use crate::errors::TypeMismatch;
use crate::graph::{Graph, PathDecl};
use crate::value::{Payload, Value};

/// What kind of problem an invocation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Reported by the transform through [`Control::error`].
    Reported,
    /// The input did not have the transform's declared input type.
    Rejected,
    /// [`crate::Transform::apply`] returned an error.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

/// Everything one invocation did, drained from its [`Control`].
#[derive(Debug, Default)]
pub struct Effects {
    /// Emitted values, in emission order.
    pub emitted: Vec<Value>,
    /// Extension node created through [`Control::decl_path`], if any.
    pub extension: Option<NodeIndex>,
    /// Finished result declared through [`Control::ret`], if any.
    pub returned: Option<Value>,
    pub issues: Vec<Issue>,
}

impl Effects {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Per-invocation control object, typed by the transform's output.
pub struct Control<'a, Out> {
    graph: &'a mut Graph,
    input: &'a Value,
    depth: usize,
    effects: Effects,
    _out: PhantomData<fn(Out)>,
}

impl<'a, Out: Payload> Control<'a, Out> {
    pub(crate) fn new(graph: &'a mut Graph, input: &'a Value, depth: usize) -> Self {
        Self {
            graph,
            input,
            depth,
            effects: Effects::default(),
            _out: PhantomData,
        }
    }

    /// Sends `value` downstream as a new, independent work item.
    pub fn emit(&mut self, value: Out) {
        self.effects.emitted.push(Value::new(value));
    }

    /// Forwards the input exactly as it was received, ignoring any edits the
    /// transform made to its own copy.
    pub fn pass(&mut self) {
        self.effects.emitted.push(self.input.clone());
    }

    /// Records a diagnostic. Does not stop emission.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push_issue(IssueKind::Reported, message.into());
    }

    /// Builder bound to this invocation's extension node.
    ///
    /// The node is created on the first call and reused by later calls within
    /// the same invocation. Once it exists, every value this invocation emits
    /// is routed to it instead of to the edge's declared destination. An
    /// extension node that is never given an outgoing edge is terminal.
    pub fn decl_path(&mut self) -> PathDecl<'_> {
        let at = match self.effects.extension {
            Some(node) => node,
            None => {
                let node = self.graph.add_extension_node(self.depth);
                self.effects.extension = Some(node);
                node
            }
        };
        PathDecl::new(&mut *self.graph, at)
    }

    /// Declares `value` as a finished result of the search. A later call
    /// replaces an earlier one.
    pub fn ret(&mut self, value: Out) {
        self.effects.returned = Some(Value::new(value));
    }

    /// Depth of the work item being processed; 0 at the head node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The raw input value, as received.
    pub fn input(&self) -> &Value {
        self.input
    }

    pub(crate) fn reject(&mut self, mismatch: TypeMismatch) {
        self.push_issue(IssueKind::Rejected, mismatch.to_string());
    }

    pub(crate) fn fail(&mut self, err: anyhow::Error) {
        self.effects.emitted.clear();
        self.effects.returned = None;
        self.effects.extension = None;
        self.push_issue(IssueKind::Failed, format!("{:#}", err));
    }

    pub(crate) fn into_effects(self) -> Effects {
        self.effects
    }

    fn push_issue(&mut self, kind: IssueKind, message: String) {
        self.effects.issues.push(Issue { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ErasedTransform, Transform};

    struct Upper;

    impl Transform for Upper {
        type In = String;
        type Out = String;

        fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
            ctrl.emit(input.to_uppercase());
            Ok(())
        }
    }

    struct EditThenPass;

    impl Transform for EditThenPass {
        type In = String;
        type Out = String;

        fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
            input.push('!');
            ctrl.pass();
            ctrl.emit(input.clone());
            Ok(())
        }
    }

    #[test]
    fn test_pass_forwards_input_as_received() {
        let mut graph = Graph::new();
        let effects = EditThenPass.invoke(&mut graph, &Value::new(String::from("a")), 0);

        let emitted: Vec<String> = effects
            .emitted
            .iter()
            .map(|v| v.downcast::<String>().unwrap())
            .collect();
        assert_eq!(emitted, vec!["a", "a!"]);
    }

    #[test]
    fn test_emit_and_pass_keep_order() {
        let mut graph = Graph::new();
        let input = Value::new(String::from("ab"));
        let mut ctrl = Control::<String>::new(&mut graph, &input, 2);

        ctrl.emit(String::from("x"));
        ctrl.pass();
        ctrl.emit(String::from("y"));
        assert_eq!(ctrl.depth(), 2);

        let effects = ctrl.into_effects();
        let emitted: Vec<String> = effects
            .emitted
            .iter()
            .map(|v| v.downcast::<String>().unwrap())
            .collect();
        assert_eq!(emitted, vec!["x", "ab", "y"]);
        assert!(effects.extension.is_none());
        assert!(!effects.has_issues());
    }

    #[test]
    fn test_decl_path_creates_one_extension_node() {
        let mut graph = Graph::new();
        let input = Value::new(String::from("1"));
        let effects = {
            let mut ctrl = Control::<String>::new(&mut graph, &input, 1);
            ctrl.decl_path().next(Upper);
            ctrl.decl_path().next(Upper);
            ctrl.emit(String::from("11"));
            ctrl.into_effects()
        };

        let extension = effects.extension.unwrap();
        // head + extension + two siblings hanging off the extension
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.outgoing(extension).len(), 2);
        assert_eq!(graph.node_name(extension), "extension@1");
    }

    #[test]
    fn test_ret_replaces_previous_return() {
        let mut graph = Graph::new();
        let input = Value::new(0_u32);
        let mut ctrl = Control::<u32>::new(&mut graph, &input, 0);

        ctrl.ret(1);
        ctrl.ret(2);
        ctrl.emit(3);

        let effects = ctrl.into_effects();
        assert_eq!(effects.returned.unwrap().downcast::<u32>().unwrap(), 2);
        assert_eq!(effects.emitted.len(), 1);
    }

    #[test]
    fn test_error_does_not_stop_emission() {
        let mut graph = Graph::new();
        let input = Value::new(0_u32);
        let mut ctrl = Control::<u32>::new(&mut graph, &input, 0);

        ctrl.error("suspicious input");
        ctrl.emit(5);

        let effects = ctrl.into_effects();
        assert_eq!(effects.emitted.len(), 1);
        assert_eq!(
            effects.issues,
            vec![Issue {
                kind: IssueKind::Reported,
                message: String::from("suspicious input")
            }]
        );
    }

    #[test]
    fn test_fail_discards_effects() {
        let mut graph = Graph::new();
        let input = Value::new(0_u32);
        let mut ctrl = Control::<u32>::new(&mut graph, &input, 0);

        ctrl.emit(1);
        ctrl.ret(2);
        ctrl.decl_path();
        ctrl.fail(anyhow::anyhow!("boom").context("while expanding"));

        let effects = ctrl.into_effects();
        assert!(effects.emitted.is_empty());
        assert!(effects.returned.is_none());
        assert!(effects.extension.is_none());
        assert_eq!(effects.issues[0].kind, IssueKind::Failed);
        assert_eq!(effects.issues[0].message, "while expanding: boom");
    }
}
