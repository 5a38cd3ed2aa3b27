// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tether.
//
// Dispatch itself never fails with an error: an unknown action or a bad arity
// is reported as "not handled". These variants cover the fallible edges around
// it (table construction, configuration, host I/O).

use thiserror::Error;

/// Top-level error type for all Tether operations.
#[derive(Debug, Error)]
pub enum TetherError {
    // -- Descriptor table --
    #[error("action already registered: {0}")]
    DuplicateAction(String),

    #[error("action name must not be empty")]
    EmptyActionName,

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TetherError>;
