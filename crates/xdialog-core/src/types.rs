// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: dialog requests, results, and interaction events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DEFAULT_CANCEL_LABEL, DEFAULT_OK_LABEL, DEFAULT_SHEET_CONFIRM_LABEL};
use crate::logo::LogoSource;
use crate::style::DialogStyleOptions;

/// Unique identifier for one dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How the dialog is put on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Standard modal dialog.
    #[default]
    Basic,
    /// Full-screen dialog presentation.
    Fullscreen,
}

impl PresentationMode {
    /// Parse the wire keyword (`"basic"` / `"fullscreen"`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "basic" => Some(Self::Basic),
            "fullscreen" => Some(Self::Fullscreen),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fullscreen => "fullscreen",
        }
    }
}

/// The dialog variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
    SingleSelect,
    MultiSelect,
    Sheet,
}

impl DialogKind {
    pub const ALL: [DialogKind; 6] = [
        Self::Alert,
        Self::Confirm,
        Self::Prompt,
        Self::SingleSelect,
        Self::MultiSelect,
        Self::Sheet,
    ];

    /// Bridge method name that requests this kind.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
            Self::SingleSelect => "singleSelect",
            Self::MultiSelect => "multiSelect",
            Self::Sheet => "sheet",
        }
    }

    /// Inverse of [`DialogKind::method_name`].
    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.method_name() == name)
    }

    /// Whether the kind carries a list of selectable options.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultiSelect)
    }
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_name())
    }
}

/// One entry in a select dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display text for the option.
    pub label: String,
    /// Opaque identifier returned when the option is selected.
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One description row of a sheet dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub title: String,
    pub logo: Option<LogoSource>,
    /// Optional value displayed on the trailing edge.
    pub value: Option<String>,
}

/// Fields every dialog kind shares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogCommon {
    pub title: Option<String>,
    pub mode: PresentationMode,
    pub style: DialogStyleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub common: DialogCommon,
    pub message: String,
    pub button_title: String,
}

impl AlertRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: DialogCommon::default(),
            message: message.into(),
            button_title: DEFAULT_OK_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub common: DialogCommon,
    pub message: String,
    pub ok_button_title: String,
    pub cancel_button_title: String,
}

impl ConfirmRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: DialogCommon::default(),
            message: message.into(),
            ok_button_title: DEFAULT_OK_LABEL.into(),
            cancel_button_title: DEFAULT_CANCEL_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub common: DialogCommon,
    pub message: String,
    pub ok_button_title: String,
    pub cancel_button_title: String,
    /// Placeholder shown while the input is empty.
    pub input_placeholder: Option<String>,
    /// Pre-filled input value.
    pub input_text: Option<String>,
    /// Focus the input and raise the keyboard on appearance.
    pub focus_input: bool,
}

impl PromptRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: DialogCommon::default(),
            message: message.into(),
            ok_button_title: DEFAULT_OK_LABEL.into(),
            cancel_button_title: DEFAULT_CANCEL_LABEL.into(),
            input_placeholder: None,
            input_text: None,
            focus_input: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSelectRequest {
    pub common: DialogCommon,
    pub message: String,
    pub options: Vec<SelectOption>,
    /// Preselected option value.
    pub selected_value: Option<String>,
    pub ok_button_title: String,
    pub cancel_button_title: String,
}

impl SingleSelectRequest {
    pub fn new(message: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            common: DialogCommon::default(),
            message: message.into(),
            options,
            selected_value: None,
            ok_button_title: DEFAULT_OK_LABEL.into(),
            cancel_button_title: DEFAULT_CANCEL_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSelectRequest {
    pub common: DialogCommon,
    pub message: String,
    pub options: Vec<SelectOption>,
    /// Preselected option values, deduplicated, in caller order.
    pub selected_values: Vec<String>,
    pub ok_button_title: String,
    pub cancel_button_title: String,
}

impl MultiSelectRequest {
    pub fn new(message: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            common: DialogCommon::default(),
            message: message.into(),
            options,
            selected_values: Vec::new(),
            ok_button_title: DEFAULT_OK_LABEL.into(),
            cancel_button_title: DEFAULT_CANCEL_LABEL.into(),
        }
    }
}

/// Sheet dialog: header logo, title, and structured rows instead of a message.
///
/// The sheet title lives in `common.title` and is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRequest {
    pub common: DialogCommon,
    pub header_logo: Option<LogoSource>,
    pub rows: Vec<SheetRow>,
    pub confirm_button_title: String,
    pub cancel_button_title: String,
}

impl SheetRequest {
    pub fn new(title: impl Into<String>, rows: Vec<SheetRow>) -> Self {
        Self {
            common: DialogCommon {
                title: Some(title.into()),
                ..DialogCommon::default()
            },
            header_logo: None,
            rows,
            confirm_button_title: DEFAULT_SHEET_CONFIRM_LABEL.into(),
            cancel_button_title: DEFAULT_CANCEL_LABEL.into(),
        }
    }

    pub fn title(&self) -> &str {
        self.common.title.as_deref().unwrap_or_default()
    }
}

/// Immutable description of one dialog invocation, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DialogRequest {
    Alert(AlertRequest),
    Confirm(ConfirmRequest),
    Prompt(PromptRequest),
    SingleSelect(SingleSelectRequest),
    MultiSelect(MultiSelectRequest),
    Sheet(SheetRequest),
}

/// Primary / secondary button labels of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLabels<'a> {
    pub primary: &'a str,
    /// `None` for alerts, which only have one button.
    pub secondary: Option<&'a str>,
}

impl DialogRequest {
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Alert(_) => DialogKind::Alert,
            Self::Confirm(_) => DialogKind::Confirm,
            Self::Prompt(_) => DialogKind::Prompt,
            Self::SingleSelect(_) => DialogKind::SingleSelect,
            Self::MultiSelect(_) => DialogKind::MultiSelect,
            Self::Sheet(_) => DialogKind::Sheet,
        }
    }

    pub fn common(&self) -> &DialogCommon {
        match self {
            Self::Alert(r) => &r.common,
            Self::Confirm(r) => &r.common,
            Self::Prompt(r) => &r.common,
            Self::SingleSelect(r) => &r.common,
            Self::MultiSelect(r) => &r.common,
            Self::Sheet(r) => &r.common,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.common().title.as_deref()
    }

    pub fn mode(&self) -> PresentationMode {
        self.common().mode
    }

    /// Message body. Sheets have rows instead.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Alert(r) => Some(&r.message),
            Self::Confirm(r) => Some(&r.message),
            Self::Prompt(r) => Some(&r.message),
            Self::SingleSelect(r) => Some(&r.message),
            Self::MultiSelect(r) => Some(&r.message),
            Self::Sheet(_) => None,
        }
    }

    /// Offered options of a select dialog; empty for every other kind.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::SingleSelect(r) => &r.options,
            Self::MultiSelect(r) => &r.options,
            _ => &[],
        }
    }

    pub fn button_labels(&self) -> ButtonLabels<'_> {
        match self {
            Self::Alert(r) => ButtonLabels {
                primary: &r.button_title,
                secondary: None,
            },
            Self::Confirm(r) => ButtonLabels {
                primary: &r.ok_button_title,
                secondary: Some(&r.cancel_button_title),
            },
            Self::Prompt(r) => ButtonLabels {
                primary: &r.ok_button_title,
                secondary: Some(&r.cancel_button_title),
            },
            Self::SingleSelect(r) => ButtonLabels {
                primary: &r.ok_button_title,
                secondary: Some(&r.cancel_button_title),
            },
            Self::MultiSelect(r) => ButtonLabels {
                primary: &r.ok_button_title,
                secondary: Some(&r.cancel_button_title),
            },
            Self::Sheet(r) => ButtonLabels {
                primary: &r.confirm_button_title,
                secondary: Some(&r.cancel_button_title),
            },
        }
    }

    /// Message body, or one `title: value` line per row for sheets.
    pub fn body_text(&self) -> String {
        match self {
            Self::Sheet(r) => r
                .rows
                .iter()
                .map(|row| match &row.value {
                    Some(value) => format!("{}: {value}", row.title),
                    None => row.title.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => self.message().unwrap_or_default().to_string(),
        }
    }

    /// Title and message joined the way text-only fallbacks show them.
    pub fn fallback_text(&self) -> String {
        let body = self.body_text();
        match self.title() {
            Some(title) if !title.is_empty() => format!("{title}\n\n{body}"),
            _ => body,
        }
    }
}

/// The single outcome of a dialog session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DialogResult {
    /// Alerts resolve without payload however they are dismissed.
    Alert,
    Confirm { confirmed: bool },
    /// `text` is empty when cancelled.
    Prompt { text: String, cancelled: bool },
    /// `value` is `None` when cancelled.
    SingleSelect { value: Option<String>, cancelled: bool },
    /// `values` is empty when cancelled.
    MultiSelect { values: Vec<String>, cancelled: bool },
    Sheet { confirmed: bool },
}

impl DialogResult {
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Alert => DialogKind::Alert,
            Self::Confirm { .. } => DialogKind::Confirm,
            Self::Prompt { .. } => DialogKind::Prompt,
            Self::SingleSelect { .. } => DialogKind::SingleSelect,
            Self::MultiSelect { .. } => DialogKind::MultiSelect,
            Self::Sheet { .. } => DialogKind::Sheet,
        }
    }

    /// The "empty" result a cancel action produces for `kind`.
    pub fn cancelled(kind: DialogKind) -> Self {
        match kind {
            DialogKind::Alert => Self::Alert,
            DialogKind::Confirm => Self::Confirm { confirmed: false },
            DialogKind::Prompt => Self::Prompt {
                text: String::new(),
                cancelled: true,
            },
            DialogKind::SingleSelect => Self::SingleSelect {
                value: None,
                cancelled: true,
            },
            DialogKind::MultiSelect => Self::MultiSelect {
                values: Vec::new(),
                cancelled: true,
            },
            DialogKind::Sheet => Self::Sheet { confirmed: false },
        }
    }

    /// Whether the user backed out. Alerts are never considered cancelled.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Alert => false,
            Self::Confirm { confirmed } | Self::Sheet { confirmed } => !confirmed,
            Self::Prompt { cancelled, .. }
            | Self::SingleSelect { cancelled, .. }
            | Self::MultiSelect { cancelled, .. } => *cancelled,
        }
    }
}

/// Interaction events a presenter feeds into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DialogEvent {
    /// An option row was tapped (select dialogs).
    OptionTapped { value: String },
    /// The prompt input changed.
    TextChanged { value: String },
    /// Primary button or equivalent affirmative action.
    Confirm,
    /// Secondary button, backdrop, close button, or back gesture.
    Cancel,
}

impl DialogEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirm | Self::Cancel)
    }
}
