// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shareable event sink handed to presenters.
//
// Native toolkits call back from their UI thread while the caller awaits on
// an async worker, so the session sits behind an `Arc<Mutex<>>`. The mutex
// only serialises access to interaction state; single resolution is still
// the result slot's job.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use xdialog_core::{DialogEvent, DialogKind, DialogRequest, SessionId};

use crate::session::{DialogSession, Dispatch, InteractionSnapshot};
use crate::slot::PendingResult;

/// Cloneable handle through which a presenter drives one session.
///
/// When the last clone is dropped before the session resolved, the waiting
/// caller is settled with `DialogError::Abandoned`.
#[derive(Clone)]
pub struct EventSink {
    id: SessionId,
    kind: DialogKind,
    inner: Arc<Mutex<DialogSession>>,
}

impl EventSink {
    pub fn new(session: DialogSession) -> Self {
        Self {
            id: session.id(),
            kind: session.kind(),
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Open a session for `request` and wrap it in a sink.
    pub fn open(request: DialogRequest) -> (Self, PendingResult) {
        let (session, pending) = DialogSession::open(request);
        (Self::new(session), pending)
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn dispatch(&self, event: DialogEvent) -> Dispatch {
        self.lock().handle(event)
    }

    pub fn option_tapped(&self, value: impl Into<String>) -> Dispatch {
        self.dispatch(DialogEvent::OptionTapped {
            value: value.into(),
        })
    }

    pub fn text_changed(&self, value: impl Into<String>) -> Dispatch {
        self.dispatch(DialogEvent::TextChanged {
            value: value.into(),
        })
    }

    pub fn confirm(&self) -> Dispatch {
        self.dispatch(DialogEvent::Confirm)
    }

    pub fn cancel(&self) -> Dispatch {
        self.dispatch(DialogEvent::Cancel)
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.lock().snapshot()
    }

    pub fn is_resolved(&self) -> bool {
        self.lock().is_resolved()
    }

    /// Request the session was opened for.
    pub fn request(&self) -> Arc<DialogRequest> {
        Arc::clone(self.lock().request())
    }

    fn lock(&self) -> MutexGuard<'_, DialogSession> {
        // A panic inside a presenter callback must not wedge the dialog.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("session_id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}
