// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop presenter over `rfd` message dialogs.
//
// Native message boxes only know fixed button sets and plain text, so this
// covers the kinds that fit: alert, confirm, and sheet (rows listed as the
// body). Prompt and the select kinds report `PlatformUnavailable`.
//
// `MessageDialog::show` blocks, so each dialog is built and shown on its own
// thread and reports back through the sink. AppKit wants the main thread, so
// macOS hosts should prefer a webview fallback.

use std::thread;

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use xdialog_core::error::{DialogError, Result};
use xdialog_core::DialogKind;
use xdialog_session::EventSink;

use crate::layout::SurfaceLayout;
use crate::traits::{Presenter, Surface};

/// Presenter for desktop and CI builds.
#[derive(Debug, Default)]
pub struct DesktopPresenter;

impl DesktopPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for DesktopPresenter {
    fn platform_name(&self) -> &str {
        "Desktop"
    }

    fn supports(&self, kind: DialogKind, _layout: SurfaceLayout) -> bool {
        matches!(kind, DialogKind::Alert | DialogKind::Confirm | DialogKind::Sheet)
    }

    fn present(&self, surface: Surface, sink: EventSink) -> Result<()> {
        if !self.supports(surface.kind(), surface.layout) {
            return Err(DialogError::PlatformUnavailable);
        }
        let request = surface.request;
        thread::Builder::new()
            .name(format!("xdialog-{}", surface.session_id))
            .spawn(move || {
                let labels = request.button_labels();
                let buttons = message_buttons(labels.primary, labels.secondary);
                let choice = MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title(request.title().unwrap_or_default())
                    .set_description(request.body_text())
                    .set_buttons(buttons)
                    .show();
                tracing::debug!(session_id = %sink.session_id(), ?choice, "message dialog closed");
                if is_affirmative(&choice, labels.primary) {
                    sink.confirm();
                } else {
                    sink.cancel();
                }
            })?;
        Ok(())
    }
}

/// Custom labels are matched back by text, so identical labels fall back to
/// the stock OK/Cancel pair.
fn message_buttons(primary: &str, secondary: Option<&str>) -> MessageButtons {
    match secondary {
        None => MessageButtons::OkCustom(primary.to_owned()),
        Some(secondary) if secondary == primary => MessageButtons::OkCancel,
        Some(secondary) => MessageButtons::OkCancelCustom(primary.to_owned(), secondary.to_owned()),
    }
}

/// Whether the button the user picked was the primary one.
fn is_affirmative(choice: &MessageDialogResult, primary: &str) -> bool {
    match choice {
        MessageDialogResult::Ok | MessageDialogResult::Yes => true,
        MessageDialogResult::Custom(label) => label == primary,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_message_box_kinds_are_supported() {
        let presenter = DesktopPresenter::new();
        let supported: Vec<_> = DialogKind::ALL
            .into_iter()
            .filter(|kind| presenter.supports(*kind, SurfaceLayout::Alert))
            .collect();
        assert_eq!(
            supported,
            [DialogKind::Alert, DialogKind::Confirm, DialogKind::Sheet]
        );
    }

    #[test]
    fn identical_labels_use_stock_buttons() {
        assert!(matches!(message_buttons("Go", Some("Go")), MessageButtons::OkCancel));
        assert!(!is_affirmative(&MessageDialogResult::Cancel, "Go"));
        assert!(matches!(
            message_buttons("Delete", Some("Keep")),
            MessageButtons::OkCancelCustom(ref ok, ref cancel) if ok == "Delete" && cancel == "Keep"
        ));
        assert!(matches!(message_buttons("OK", None), MessageButtons::OkCustom(_)));
    }

    #[test]
    fn custom_labels_map_back_to_actions() {
        assert!(is_affirmative(&MessageDialogResult::Custom("Delete".into()), "Delete"));
        assert!(!is_affirmative(&MessageDialogResult::Custom("Keep".into()), "Delete"));
        assert!(is_affirmative(&MessageDialogResult::Ok, "OK"));
        assert!(!is_affirmative(&MessageDialogResult::Cancel, "OK"));
    }
}
