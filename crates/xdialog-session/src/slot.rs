// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Write-once result slot.
//
// The sending half is taken out of its `Option` on the first settle, so a
// second settle finds nothing to send through. That take is the whole
// at-most-one-resolution guarantee. Dropping the slot unsettled closes the
// channel and the waiting caller sees `DialogError::Abandoned` instead of
// hanging.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use xdialog_core::DialogResult;
use xdialog_core::error::{DialogError, Result};

/// Outcome of [`ResultSlot::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// This call delivered the result.
    Settled,
    /// A previous call already did; the new result was discarded.
    AlreadySettled,
}

/// Producer half: written exactly once by the session.
#[derive(Debug)]
pub struct ResultSlot {
    tx: Option<oneshot::Sender<DialogResult>>,
}

/// Consumer half: awaited by the caller.
#[derive(Debug)]
pub struct PendingResult {
    rx: oneshot::Receiver<DialogResult>,
}

/// Create a connected slot / pending-result pair.
pub fn result_slot() -> (ResultSlot, PendingResult) {
    let (tx, rx) = oneshot::channel();
    (ResultSlot { tx: Some(tx) }, PendingResult { rx })
}

impl ResultSlot {
    pub fn settle(&mut self, result: DialogResult) -> Settle {
        let Some(tx) = self.tx.take() else {
            return Settle::AlreadySettled;
        };
        if tx.send(result).is_err() {
            // The caller stopped waiting. The slot is still spent.
            tracing::debug!("dialog result settled after the caller went away");
        }
        Settle::Settled
    }

    pub fn is_settled(&self) -> bool {
        self.tx.is_none()
    }
}

impl PendingResult {
    /// Non-blocking check. `None` while the dialog is still on screen.
    pub fn try_take(&mut self) -> Option<Result<DialogResult>> {
        match self.rx.try_recv() {
            Ok(result) => Some(Ok(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(DialogError::Abandoned)),
        }
    }
}

impl Future for PendingResult {
    type Output = Result<DialogResult>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().rx)
            .poll(cx)
            .map(|received| received.map_err(|_| DialogError::Abandoned))
    }
}
