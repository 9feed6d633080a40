// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file location and persistence.

use std::path::{Path, PathBuf};

use xdialog_core::PluginConfig;
use xdialog_core::error::Result;

pub const CONFIG_FILE: &str = "config.json";

/// Directory holding the xdialog config. Not created until something is
/// persisted into it.
pub fn config_dir() -> PathBuf {
    dirs_fallback().join("xdialog")
}

/// `<config dir>/config.json`.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

fn dirs_fallback() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config");
    }
    std::env::temp_dir()
}

/// Load the config at `path`.
///
/// `Ok(None)` means there is no file yet. Read and parse failures are
/// returned so the caller can log them once tracing is up.
pub fn load_config(path: &Path) -> Result<Option<PluginConfig>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

/// Write `config` to `path` as pretty JSON, creating parent directories.
pub fn persist_config(path: &Path, config: &PluginConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdialog_core::PresentationMode;
    use xdialog_core::error::DialogError;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn persisted_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = PluginConfig::default();
        config.default_mode = PresentationMode::Fullscreen;
        config.labels.ok = "Got it".into();
        persist_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), Some(config));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(DialogError::Serialization(_))));
    }

    #[test]
    fn default_path_ends_in_xdialog_config() {
        let path = default_config_path();
        assert!(path.ends_with(Path::new("xdialog").join(CONFIG_FILE)));
    }
}
