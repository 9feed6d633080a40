// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic presenter trait.
//
// A presenter puts one dialog on screen and feeds what the user does back
// through an `EventSink`. It never decides the result itself: the session
// owns interaction state and settles the caller exactly once.

use std::sync::Arc;

use serde::Serialize;
use xdialog_core::error::Result;
use xdialog_core::{DialogKind, DialogRequest, ResolvedStyle, SessionId};
use xdialog_session::EventSink;

use crate::layout::{self, SurfaceLayout};

/// Everything a presenter needs to build the native UI for one dialog.
///
/// Serializable so hosts that render in another runtime (the Android
/// `DialogHost`) can receive it as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub session_id: SessionId,
    pub request: Arc<DialogRequest>,
    pub style: ResolvedStyle,
    pub layout: SurfaceLayout,
    /// Content-to-button gap after layout defaults, `None` for the platform default.
    pub content_button_spacing: Option<f32>,
}

impl Surface {
    pub fn new(
        session_id: SessionId,
        request: Arc<DialogRequest>,
        style: ResolvedStyle,
        layout: SurfaceLayout,
    ) -> Self {
        Self {
            session_id,
            content_button_spacing: layout::content_button_spacing(&style, layout),
            request,
            style,
            layout,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.request.kind()
    }
}

/// Renders dialogs with a native toolkit.
pub trait Presenter: Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android", "Desktop").
    fn platform_name(&self) -> &str;

    /// Whether this presenter can render `kind` in `layout`.
    ///
    /// Checked before a session is opened, so an unsupported kind rejects
    /// the call with `PlatformUnavailable` instead of hanging.
    fn supports(&self, _kind: DialogKind, _layout: SurfaceLayout) -> bool {
        true
    }

    /// Put the dialog on screen and return without waiting for the user.
    ///
    /// The presenter keeps `sink` (or clones of it) alive for as long as the
    /// dialog is visible and reports every interaction through it. An `Err`
    /// means nothing was shown.
    fn present(&self, surface: Surface, sink: EventSink) -> Result<()>;
}
