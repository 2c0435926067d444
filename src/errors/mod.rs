// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod graph;
mod value;

pub use config::ConfigError;
pub use execution::{ExecutionError, Resource};
pub use graph::GraphError;
pub use value::TypeMismatch;
