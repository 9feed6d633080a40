// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rejection payloads handed back to the calling web app.
//
// Host bridges settle a failed call with `reject(message, code)`. The code is
// stable and machine-readable; the message is what a developer sees in the
// console, so it stays short and names the offending field.

use serde::{Deserialize, Serialize};

use crate::error::DialogError;

/// Stable rejection codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    /// The call was malformed; no dialog was shown.
    InvalidArgument,
    /// Unknown method name.
    Unimplemented,
    /// Nowhere to present, or the platform lacks this dialog kind.
    Unavailable,
    /// The presenter went away before the user answered.
    CancelledByPlatform,
    /// Anything else (I/O, serialization).
    Internal,
}

/// A rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: RejectionCode,
    pub message: String,
}

/// Convert a `DialogError` into the payload a host bridge rejects with.
pub fn reject(err: &DialogError) -> Rejection {
    let code = match err {
        DialogError::MissingField { .. }
        | DialogError::InvalidField { .. }
        | DialogError::InvalidArguments => RejectionCode::InvalidArgument,
        DialogError::UnknownMethod(_) => RejectionCode::Unimplemented,
        DialogError::Bridge(_) | DialogError::PlatformUnavailable => RejectionCode::Unavailable,
        DialogError::Abandoned => RejectionCode::CancelledByPlatform,
        DialogError::Io(_) | DialogError::Serialization(_) => RejectionCode::Internal,
    };
    Rejection {
        code,
        message: err.to_string(),
    }
}
