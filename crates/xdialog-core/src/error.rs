// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for xdialog.

use thiserror::Error;

/// Top-level error type for all xdialog operations.
///
/// Only two things can go wrong with a dialog: the caller sent a request we
/// cannot honour, or the platform could not put the dialog on screen.
/// Cosmetic problems (bad colors, malformed options) never surface here.
#[derive(Debug, Error)]
pub enum DialogError {
    // -- Caller contract errors --
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("call arguments must be a JSON object")]
    InvalidArguments,

    #[error("unknown dialog method: {0}")]
    UnknownMethod(String),

    // -- Presentation --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("dialog kind not available on this platform")]
    PlatformUnavailable,

    #[error("dialog was torn down before the user answered")]
    Abandoned,

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DialogError {
    /// True for errors caused by the caller's request rather than the platform.
    ///
    /// Contract errors are raised before any session exists.
    pub fn is_contract_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::InvalidArguments
                | Self::UnknownMethod(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DialogError>;
