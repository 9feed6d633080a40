// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// xdialog — single-resolution dialog sessions.

pub mod session;
pub mod sink;
pub mod slot;

pub use session::{DialogSession, Dispatch, InteractionSnapshot, SessionState};
pub use sink::EventSink;
pub use slot::{PendingResult, ResultSlot, Settle, result_slot};
