// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// A value was asked for as a type it does not hold.
///
/// Inside a transform invocation this is recoverable: the invocation is
/// rejected and the branch is pruned. Anywhere else it is a defect in the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Bad cast, expected {expected}, but got {actual}")]
pub struct TypeMismatch {
    /// Type that was requested.
    pub expected: &'static str,
    /// Type actually stored.
    pub actual: &'static str,
}
