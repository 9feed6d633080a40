// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin configuration.

use serde::{Deserialize, Serialize};

use crate::types::PresentationMode;

pub const DEFAULT_OK_LABEL: &str = "OK";
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";
pub const DEFAULT_SHEET_CONFIRM_LABEL: &str = "Confirm";

/// Button labels used when a call does not supply its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLabels {
    pub ok: String,
    pub cancel: String,
    /// Sheets confirm with their own wording.
    pub sheet_confirm: String,
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            ok: DEFAULT_OK_LABEL.into(),
            cancel: DEFAULT_CANCEL_LABEL.into(),
            sheet_confirm: DEFAULT_SHEET_CONFIRM_LABEL.into(),
        }
    }
}

/// Persistent plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Mode used when a call omits `mode` or sends an unknown one.
    pub default_mode: PresentationMode,
    pub labels: DefaultLabels,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            default_mode: PresentationMode::Basic,
            labels: DefaultLabels::default(),
            log_filter: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"default_mode":"fullscreen","labels":{"ok":"Sure"}}"#)
                .unwrap();
        assert_eq!(config.default_mode, PresentationMode::Fullscreen);
        assert_eq!(config.labels.ok, "Sure");
        assert_eq!(config.labels.cancel, "Cancel");
        assert_eq!(config.log_filter, "info");
    }
}
