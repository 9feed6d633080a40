// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dialog session state machine.
//
// A session is born `Presenting` and moves to `Resolved` exactly once, on the
// first confirm or cancel. While presenting it buffers the interaction state
// of its kind (prompt text, single selection, multi-selection set). Every
// event after resolution is a no-op.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use xdialog_core::options::is_offered;
use xdialog_core::{DialogEvent, DialogKind, DialogRequest, DialogResult, SelectOption, SessionId};

use crate::slot::{PendingResult, ResultSlot, Settle, result_slot};

/// Lifecycle states of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Presenting,
    Resolved,
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Interaction state changed.
    Updated,
    /// Event meant nothing for this kind, or named an option never offered.
    Ignored,
    /// This event resolved the session with the given result.
    Resolved(DialogResult),
    /// The session had already resolved; nothing happened.
    AlreadyResolved,
}

/// Per-kind interaction state, scoped to one session.
#[derive(Debug, Clone)]
enum Interaction {
    /// Alert, confirm and sheet have nothing to buffer.
    Nothing,
    Text(String),
    Single(Option<String>),
    Multi(Vec<String>),
}

/// Read-only view of the interaction state, for presenters that re-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSnapshot {
    pub text: Option<String>,
    pub selected_value: Option<String>,
    pub selected_values: Vec<String>,
}

impl InteractionSnapshot {
    /// Whether an option with `value` renders as checked.
    pub fn is_checked(&self, value: &str) -> bool {
        self.selected_value.as_deref() == Some(value)
            || self.selected_values.iter().any(|v| v == value)
    }
}

/// One in-flight dialog interaction.
#[derive(Debug)]
pub struct DialogSession {
    id: SessionId,
    request: Arc<DialogRequest>,
    state: SessionState,
    interaction: Interaction,
    slot: ResultSlot,
    opened_at: DateTime<Utc>,
}

impl DialogSession {
    /// Accept a validated request. The session starts presenting at once.
    pub fn open(request: DialogRequest) -> (Self, PendingResult) {
        let interaction = match &request {
            DialogRequest::Prompt(r) => Interaction::Text(r.input_text.clone().unwrap_or_default()),
            // A preselection nobody was offered starts out unselected.
            DialogRequest::SingleSelect(r) => Interaction::Single(
                r.selected_value
                    .clone()
                    .filter(|value| is_offered(&r.options, value)),
            ),
            DialogRequest::MultiSelect(r) => Interaction::Multi(r.selected_values.clone()),
            DialogRequest::Alert(_) | DialogRequest::Confirm(_) | DialogRequest::Sheet(_) => {
                Interaction::Nothing
            }
        };
        let (slot, pending) = result_slot();
        let session = Self {
            id: SessionId::new(),
            request: Arc::new(request),
            state: SessionState::Presenting,
            interaction,
            slot,
            opened_at: Utc::now(),
        };
        debug!(session_id = %session.id, kind = %session.kind(), "dialog session opened");
        (session, pending)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> DialogKind {
        self.request.kind()
    }

    pub fn request(&self) -> &Arc<DialogRequest> {
        &self.request
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state == SessionState::Resolved
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        match &self.interaction {
            Interaction::Nothing => InteractionSnapshot::default(),
            Interaction::Text(text) => InteractionSnapshot {
                text: Some(text.clone()),
                ..Default::default()
            },
            Interaction::Single(selected) => InteractionSnapshot {
                selected_value: selected.clone(),
                ..Default::default()
            },
            Interaction::Multi(selected) => InteractionSnapshot {
                selected_values: selected.clone(),
                ..Default::default()
            },
        }
    }

    /// Feed one interaction event into the session.
    pub fn handle(&mut self, event: DialogEvent) -> Dispatch {
        if self.is_resolved() {
            debug!(session_id = %self.id, ?event, "event after resolution ignored");
            return Dispatch::AlreadyResolved;
        }

        match event {
            DialogEvent::OptionTapped { value } => self.tap_option(value),
            DialogEvent::TextChanged { value } => match &mut self.interaction {
                Interaction::Text(buffer) => {
                    *buffer = value;
                    Dispatch::Updated
                }
                _ => Dispatch::Ignored,
            },
            DialogEvent::Confirm => {
                let result = self.confirm_result();
                self.resolve(result)
            }
            DialogEvent::Cancel => self.resolve(DialogResult::cancelled(self.kind())),
        }
    }

    fn tap_option(&mut self, value: String) -> Dispatch {
        if !is_offered(self.request.options(), &value) {
            if self.kind().is_select() {
                warn!(session_id = %self.id, %value, "tap on an option that was never offered");
            }
            return Dispatch::Ignored;
        }
        match &mut self.interaction {
            // Single select replaces unconditionally; there is no toggle-off.
            Interaction::Single(selected) => {
                *selected = Some(value);
                Dispatch::Updated
            }
            Interaction::Multi(selected) => {
                if let Some(pos) = selected.iter().position(|v| *v == value) {
                    selected.remove(pos);
                } else {
                    selected.push(value);
                }
                Dispatch::Updated
            }
            _ => Dispatch::Ignored,
        }
    }

    fn confirm_result(&self) -> DialogResult {
        match (&*self.request, &self.interaction) {
            (DialogRequest::Alert(_), _) => DialogResult::Alert,
            (DialogRequest::Confirm(_), _) => DialogResult::Confirm { confirmed: true },
            (DialogRequest::Sheet(_), _) => DialogResult::Sheet { confirmed: true },
            (DialogRequest::Prompt(_), Interaction::Text(text)) => DialogResult::Prompt {
                text: text.clone(),
                cancelled: false,
            },
            (DialogRequest::SingleSelect(_), Interaction::Single(selected)) => {
                DialogResult::SingleSelect {
                    value: selected.clone(),
                    cancelled: false,
                }
            }
            (DialogRequest::MultiSelect(r), Interaction::Multi(selected)) => {
                DialogResult::MultiSelect {
                    values: display_order(&r.options, selected),
                    cancelled: false,
                }
            }
            // `open` pairs every request kind with its interaction variant.
            (request, _) => DialogResult::cancelled(request.kind()),
        }
    }

    fn resolve(&mut self, result: DialogResult) -> Dispatch {
        match self.slot.settle(result.clone()) {
            Settle::Settled => {
                self.state = SessionState::Resolved;
                let elapsed_ms = (Utc::now() - self.opened_at).num_milliseconds();
                info!(
                    session_id = %self.id,
                    kind = %self.kind(),
                    cancelled = result.is_cancelled(),
                    elapsed_ms,
                    "dialog resolved"
                );
                Dispatch::Resolved(result)
            }
            Settle::AlreadySettled => {
                self.state = SessionState::Resolved;
                Dispatch::AlreadyResolved
            }
        }
    }
}

/// Selected values in option display order, each once, followed by
/// preselected values that match no option, in caller order.
fn display_order(options: &[SelectOption], selected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(selected.len());
    for option in options {
        if selected.contains(&option.value) && !out.contains(&option.value) {
            out.push(option.value.clone());
        }
    }
    for value in selected {
        if !is_offered(options, value) && !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdialog_core::{
        AlertRequest, ConfirmRequest, MultiSelectRequest, PromptRequest, SheetRequest, SheetRow,
        SingleSelectRequest,
    };

    fn ab_options() -> Vec<SelectOption> {
        vec![SelectOption::new("A", "a"), SelectOption::new("B", "b")]
    }

    fn tap(value: &str) -> DialogEvent {
        DialogEvent::OptionTapped {
            value: value.into(),
        }
    }

    fn confirm_request() -> DialogRequest {
        DialogRequest::Confirm(ConfirmRequest::new("Proceed?"))
    }

    #[test]
    fn session_starts_presenting() {
        let (session, _pending) = DialogSession::open(confirm_request());
        assert_eq!(session.state(), SessionState::Presenting);
    }

    #[test]
    fn confirm_then_cancel_resolves_once() {
        let (mut session, mut pending) = DialogSession::open(confirm_request());
        assert_eq!(
            session.handle(DialogEvent::Confirm),
            Dispatch::Resolved(DialogResult::Confirm { confirmed: true })
        );
        assert_eq!(session.handle(DialogEvent::Cancel), Dispatch::AlreadyResolved);
        assert_eq!(session.handle(DialogEvent::Confirm), Dispatch::AlreadyResolved);
        assert_eq!(session.state(), SessionState::Resolved);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::Confirm { confirmed: true }
        );
    }

    #[test]
    fn cancel_then_confirm_keeps_the_cancel() {
        let (mut session, mut pending) = DialogSession::open(confirm_request());
        session.handle(DialogEvent::Cancel);
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::Confirm { confirmed: false }
        );
    }

    #[test]
    fn alert_resolves_empty_either_way() {
        for action in [DialogEvent::Confirm, DialogEvent::Cancel] {
            let (mut session, mut pending) =
                DialogSession::open(DialogRequest::Alert(AlertRequest::new("Saved")));
            session.handle(action);
            assert_eq!(pending.try_take().unwrap().unwrap(), DialogResult::Alert);
        }
    }

    #[test]
    fn preselection_round_trip() {
        let mut request = SingleSelectRequest::new("Pick one", ab_options());
        request.selected_value = Some("b".into());
        let (mut session, mut pending) = DialogSession::open(DialogRequest::SingleSelect(request));
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::SingleSelect {
                value: Some("b".into()),
                cancelled: false
            }
        );
    }

    #[test]
    fn unoffered_single_preselection_confirms_as_null() {
        let mut request = SingleSelectRequest::new("Pick", vec![SelectOption::new("B", "b")]);
        request.selected_value = Some("a".into());
        let (mut session, mut pending) = DialogSession::open(DialogRequest::SingleSelect(request));
        assert_eq!(session.snapshot().selected_value, None);
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::SingleSelect {
                value: None,
                cancelled: false
            }
        );
    }

    #[test]
    fn single_select_tap_replaces_without_toggle_off() {
        let (mut session, _pending) =
            DialogSession::open(DialogRequest::SingleSelect(SingleSelectRequest::new(
                "Pick one",
                ab_options(),
            )));
        session.handle(tap("a"));
        session.handle(tap("a"));
        assert_eq!(session.snapshot().selected_value.as_deref(), Some("a"));
        session.handle(tap("b"));
        assert_eq!(session.snapshot().selected_value.as_deref(), Some("b"));
    }

    #[test]
    fn never_offered_option_cannot_be_selected() {
        let options = vec![SelectOption::new("B", "b")];
        let (mut session, mut pending) = DialogSession::open(DialogRequest::SingleSelect(
            SingleSelectRequest::new("Pick one", options),
        ));
        assert_eq!(session.handle(tap("A")), Dispatch::Ignored);
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::SingleSelect {
                value: None,
                cancelled: false
            }
        );
    }

    #[test]
    fn multi_select_toggle_is_idempotent_over_two_taps() {
        let mut request = MultiSelectRequest::new("Pick some", ab_options());
        request.selected_values = vec!["a".into()];
        let (mut session, _pending) = DialogSession::open(DialogRequest::MultiSelect(request));
        let before = session.snapshot();
        session.handle(tap("b"));
        assert!(session.snapshot().is_checked("b"));
        session.handle(tap("b"));
        assert_eq!(session.snapshot(), before);
        session.handle(tap("a"));
        session.handle(tap("a"));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn multi_select_returns_display_order() {
        let options = vec![
            SelectOption::new("One", "1"),
            SelectOption::new("Two", "2"),
            SelectOption::new("Three", "3"),
        ];
        let mut request = MultiSelectRequest::new("Pick some", options);
        request.selected_values = vec!["ghost".into()];
        let (mut session, mut pending) = DialogSession::open(DialogRequest::MultiSelect(request));
        session.handle(tap("3"));
        session.handle(tap("1"));
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::MultiSelect {
                values: vec!["1".into(), "3".into(), "ghost".into()],
                cancelled: false
            }
        );
    }

    #[test]
    fn duplicate_option_values_are_returned_once() {
        let options = vec![SelectOption::new("First", "dup"), SelectOption::new("Second", "dup")];
        let mut request = MultiSelectRequest::new("Pick", options);
        request.selected_values = vec!["dup".into()];
        let (mut session, mut pending) = DialogSession::open(DialogRequest::MultiSelect(request));
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::MultiSelect {
                values: vec!["dup".into()],
                cancelled: false
            }
        );
    }

    #[test]
    fn cancel_is_the_complement_regardless_of_state() {
        let mut request = MultiSelectRequest::new("Pick some", ab_options());
        request.selected_values = vec!["a".into(), "b".into()];
        let (mut session, mut pending) = DialogSession::open(DialogRequest::MultiSelect(request));
        session.handle(tap("a"));
        session.handle(DialogEvent::Cancel);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::MultiSelect {
                values: vec![],
                cancelled: true
            }
        );

        let mut request = SingleSelectRequest::new("Pick one", ab_options());
        request.selected_value = Some("a".into());
        let (mut session, mut pending) = DialogSession::open(DialogRequest::SingleSelect(request));
        session.handle(DialogEvent::Cancel);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::SingleSelect {
                value: None,
                cancelled: true
            }
        );
    }

    #[test]
    fn prompt_cancel_discards_buffer() {
        let (mut session, mut pending) =
            DialogSession::open(DialogRequest::Prompt(PromptRequest::new("Name?")));
        session.handle(DialogEvent::TextChanged {
            value: "hello".into(),
        });
        session.handle(DialogEvent::Cancel);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::Prompt {
                text: String::new(),
                cancelled: true
            }
        );
    }

    #[test]
    fn prompt_confirm_returns_buffer_seeded_from_input_text() {
        let mut request = PromptRequest::new("Name?");
        request.input_text = Some("Ada".into());
        let (mut session, mut pending) = DialogSession::open(DialogRequest::Prompt(request));
        assert_eq!(session.snapshot().text.as_deref(), Some("Ada"));
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::Prompt {
                text: "Ada".into(),
                cancelled: false
            }
        );
    }

    #[test]
    fn sheet_confirms_and_cancels() {
        let rows = vec![SheetRow {
            title: "Total".into(),
            logo: None,
            value: Some("$9.99".into()),
        }];
        let (mut session, mut pending) =
            DialogSession::open(DialogRequest::Sheet(SheetRequest::new("Order", rows)));
        assert_eq!(session.handle(tap("x")), Dispatch::Ignored);
        session.handle(DialogEvent::Confirm);
        assert_eq!(
            pending.try_take().unwrap().unwrap(),
            DialogResult::Sheet { confirmed: true }
        );
    }

    #[test]
    fn text_events_are_ignored_outside_prompts() {
        let (mut session, _pending) = DialogSession::open(confirm_request());
        assert_eq!(
            session.handle(DialogEvent::TextChanged { value: "x".into() }),
            Dispatch::Ignored
        );
    }
}
