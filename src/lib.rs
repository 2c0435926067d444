// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // engine configuration + loaders
pub mod engine;        // scheduler, control, work queue
pub mod errors;        // error handling
pub mod graph;         // arena graph + path builder
pub mod observability;
pub mod traits;        // transform abstraction
pub mod value;         // type-erased values

pub use config::EngineConfig;
pub use engine::{Control, Engine, Execution, Outcome};
pub use errors::{ExecutionError, TypeMismatch};
pub use graph::{Graph, PathDecl};
pub use traits::Transform;
pub use value::Value;
