// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type-erased values flowing between transforms.
//!
//! Edges in one graph carry heterogeneous payloads (an `i32` on one edge, a
//! `String` on the next), so the scheduler only ever sees [`Value`]: a shared,
//! immutable box that remembers the identity of the type it holds.
//!
//! # Contract
//!
//! * [`Value::new`] wraps any [`Payload`]
//! * [`Value::type_info`] recovers the identity of the wrapped type
//! * [`Value::downcast`] returns the payload only when the requested type is
//!   exactly the stored one, otherwise [`TypeMismatch`]
//!
//! No conversion is ever attempted: a `Value` holding `u32` does not
//! downcast to `u64`.
//!
//! # Example
//! ```
//! use the_thicket::value::Value;
//!
//! let value = Value::new(String::from("241"));
//! assert!(value.is::<String>());
//! assert_eq!(value.downcast::<String>().unwrap(), "241");
//! assert!(value.downcast::<i32>().is_err());
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::errors::TypeMismatch;

/// Anything that can travel through the graph.
///
/// Payloads are cloned when a transform receives its own copy of the input,
/// and printed in diagnostics.
pub trait Payload: Any + Clone + fmt::Debug + Send + Sync {}

impl<T> Payload for T where T: Any + Clone + fmt::Debug + Send + Sync {}

/// Runtime identity of a payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Identity of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type ErasedPayload = dyn Any + Send + Sync;
type DebugFn = fn(&ErasedPayload, &mut fmt::Formatter<'_>) -> fmt::Result;

/// A shared, immutable, type-erased payload.
///
/// Cloning a `Value` is cheap: clones share the same payload.
#[derive(Clone)]
pub struct Value {
    payload: Arc<ErasedPayload>,
    info: TypeInfo,
    debug: DebugFn,
}

impl Value {
    /// Wraps `payload`, remembering its type.
    pub fn new<T: Payload>(payload: T) -> Self {
        Self {
            payload: Arc::new(payload),
            info: TypeInfo::of::<T>(),
            debug: debug_payload::<T>,
        }
    }

    pub fn type_info(&self) -> TypeInfo {
        self.info
    }

    /// `TypeId` of the stored payload, not of `Value` itself.
    pub fn type_id(&self) -> TypeId {
        self.info.id()
    }

    pub fn type_name(&self) -> &'static str {
        self.info.name()
    }

    /// True when the stored payload is exactly a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.info.id() == TypeId::of::<T>()
    }

    /// Borrows the payload as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, TypeMismatch> {
        (*self.payload)
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch::<T>())
    }

    /// Returns an owned copy of the payload as a `T`.
    pub fn downcast<T: Payload>(&self) -> Result<T, TypeMismatch> {
        self.downcast_ref::<T>().cloned()
    }

    /// Consumes the value, avoiding the copy when this is the last handle on
    /// the payload.
    pub fn take<T: Payload>(self) -> Result<T, TypeMismatch> {
        let mismatch = self.mismatch::<T>();
        let shared = self.payload.downcast::<T>().map_err(|_| mismatch)?;
        Ok(Arc::try_unwrap(shared).unwrap_or_else(|shared| (*shared).clone()))
    }

    fn mismatch<T: Any>(&self) -> TypeMismatch {
        TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: self.info.name(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(&*self.payload, f)
    }
}

fn debug_payload<T: Payload>(payload: &ErasedPayload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match payload.downcast_ref::<T>() {
        Some(inner) => fmt::Debug::fmt(inner, f),
        None => f.write_str("<unprintable>"),
    }
}
