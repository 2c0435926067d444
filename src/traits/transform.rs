// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The unit of computation: [`Transform`].
//!
//! A transform consumes one typed input and reports its effects through a
//! [`Control`]: emitting successors, passing its input through, recording an
//! error, returning a finished result, or declaring new downstream stages.
//!
//! Transforms are typed, but the graph that stores them is not: every edge
//! holds a [`TransformRef`], the type-erased view provided by
//! [`ErasedTransform`]. The erased layer checks the runtime type of the
//! incoming [`Value`] before handing a decoded copy to [`Transform::apply`].
//!
//! # Example
//! ```
//! use the_thicket::{Control, Transform};
//!
//! /// Emits every permutation of its input.
//! struct AllPermutations;
//!
//! impl Transform for AllPermutations {
//!     type In = String;
//!     type Out = String;
//!
//!     fn apply(&self, ctrl: &mut Control<'_, String>, input: &mut String) -> anyhow::Result<()> {
//!         let mut chars: Vec<char> = input.chars().collect();
//!         chars.sort_unstable();
//!         permute(&mut chars, 0, &mut |p| ctrl.emit(p.iter().collect()));
//!         Ok(())
//!     }
//! }
//!
//! fn permute(chars: &mut Vec<char>, k: usize, out: &mut dyn FnMut(&[char])) {
//!     if k == chars.len() {
//!         return out(chars);
//!     }
//!     for i in k..chars.len() {
//!         chars.swap(k, i);
//!         permute(chars, k + 1, out);
//!         chars.swap(k, i);
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::engine::control::{Control, Effects};
use crate::graph::Graph;
use crate::value::{Payload, TypeInfo, Value};

/// A typed computation stage.
pub trait Transform: Send + Sync + 'static {
    /// Type of the value this transform consumes.
    type In: Payload;
    /// Type of the values it emits or returns.
    type Out: Payload;

    /// Name used for graph nodes and diagnostics. Defaults to the type name
    /// without its module path.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Applies the transform to its own copy of the input.
    ///
    /// The transform may edit `input` freely before re-emitting it. Returning
    /// an error records it and discards everything this invocation emitted.
    fn apply(&self, ctrl: &mut Control<'_, Self::Out>, input: &mut Self::In) -> anyhow::Result<()>;
}

/// Type-erased view of a [`Transform`], as stored on graph edges.
pub trait ErasedTransform: Send + Sync {
    fn transform_name(&self) -> &str;

    fn input_type(&self) -> TypeInfo;

    fn output_type(&self) -> TypeInfo;

    /// Runs one invocation against `input` at `depth`, returning its effects.
    ///
    /// An input of the wrong type is rejected: the effects carry a single
    /// error and nothing else.
    fn invoke(&self, graph: &mut Graph, input: &Value, depth: usize) -> Effects;
}

/// Shared handle to a transform coloring an edge.
pub type TransformRef = Arc<dyn ErasedTransform>;

impl<T: Transform> ErasedTransform for T {
    fn transform_name(&self) -> &str {
        Transform::name(self)
    }

    fn input_type(&self) -> TypeInfo {
        TypeInfo::of::<T::In>()
    }

    fn output_type(&self) -> TypeInfo {
        TypeInfo::of::<T::Out>()
    }

    fn invoke(&self, graph: &mut Graph, input: &Value, depth: usize) -> Effects {
        let mut ctrl = Control::<T::Out>::new(graph, input, depth);

        let mut decoded = match input.downcast::<T::In>() {
            Ok(decoded) => decoded,
            Err(mismatch) => {
                ctrl.reject(mismatch);
                return ctrl.into_effects();
            }
        };

        if let Err(err) = self.apply(&mut ctrl, &mut decoded) {
            ctrl.fail(err);
        }

        ctrl.into_effects()
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
