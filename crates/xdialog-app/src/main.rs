// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// xdialog — command-line dialog host.
//
// Entry point. Loads the config, initialises logging, reads one call and
// prints its JSON response (or rejection) on stdout.

mod services;

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use xdialog_bridge::DialogPlugin;
use xdialog_core::error::{DialogError, Result};
use xdialog_core::{PluginConfig, rejection};

use services::config_store;
use services::console::ConsolePresenter;

#[derive(Parser, Debug)]
#[command(name = "xdialog")]
#[command(about = "Show an extended dialog and print the result as JSON")]
#[command(version)]
struct Args {
    /// alert, confirm, prompt, singleSelect, multiSelect or sheet
    #[arg(required_unless_present = "write_default_config")]
    method: Option<String>,

    /// Call options as a JSON object (default: first line of stdin)
    #[arg(long, value_name = "JSON", conflicts_with = "options_file")]
    options: Option<String>,

    /// Read call options from a JSON file
    #[arg(long, value_name = "PATH")]
    options_file: Option<PathBuf>,

    /// Where the dialog is shown
    #[arg(long, value_enum, default_value_t = PresenterChoice::Console)]
    presenter: PresenterChoice,

    /// Config file (default: $XDG_CONFIG_HOME/xdialog/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default config to the config path
    #[arg(long)]
    write_default_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresenterChoice {
    /// Text prompts on stderr, answers on stdin
    Console,
    /// The operating system's own dialogs
    Native,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(config_store::default_config_path);
    let loaded = config_store::load_config(&config_path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => PluginConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match loaded {
        Ok(Some(_)) => tracing::debug!(path = %config_path.display(), "config loaded"),
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults")
        }
        Err(e) => tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "config unreadable, using defaults"
        ),
    }

    if args.write_default_config {
        if let Err(e) = config_store::persist_config(&config_path, &PluginConfig::default()) {
            tracing::error!(path = %config_path.display(), error = %e, "could not write config");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %config_path.display(), "default config written");
    }

    let Some(method) = args.method.as_deref() else {
        return ExitCode::SUCCESS;
    };

    let outcome = async {
        let call_args = read_call_options(&args)?;
        let plugin = build_plugin(args.presenter, config)?;
        plugin.call(method, call_args).await
    }
    .await;

    match outcome {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let rejection = rejection::reject(&e);
            tracing::warn!(
                code = ?rejection.code,
                %method,
                "call rejected: {}", rejection.message
            );
            match serde_json::to_string(&rejection) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "could not encode rejection"),
            }
            ExitCode::FAILURE
        }
    }
}

fn build_plugin(choice: PresenterChoice, config: PluginConfig) -> Result<DialogPlugin> {
    match choice {
        PresenterChoice::Console => {
            Ok(DialogPlugin::new(Arc::new(ConsolePresenter::new()), config))
        }
        PresenterChoice::Native => DialogPlugin::with_platform_presenter(config),
    }
}

/// Options from `--options`, `--options-file`, or the first line of stdin.
///
/// Only one stdin line is consumed so the console presenter can read the
/// answers that follow. A blank line means no options.
fn read_call_options(args: &Args) -> Result<Value> {
    let raw = match (&args.options, &args.options_file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line
        }
    };
    parse_options(&raw)
}

fn parse_options(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(error = %e, "call options are not valid JSON");
        DialogError::InvalidArguments
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_required_unless_writing_config() {
        assert!(Args::try_parse_from(["xdialog"]).is_err());
        let args = Args::try_parse_from(["xdialog", "--write-default-config"]).unwrap();
        assert!(args.method.is_none());
    }

    #[test]
    fn console_is_the_default_presenter() {
        let args = Args::try_parse_from(["xdialog", "confirm", "--options", "{}"]).unwrap();
        assert_eq!(args.method.as_deref(), Some("confirm"));
        assert_eq!(args.presenter, PresenterChoice::Console);
    }

    #[test]
    fn inline_options_conflict_with_file() {
        let parsed = Args::try_parse_from([
            "xdialog",
            "alert",
            "--options",
            "{}",
            "--options-file",
            "call.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_options_are_null_and_garbage_is_rejected() {
        assert_eq!(parse_options("  \n").unwrap(), Value::Null);
        assert_eq!(
            parse_options(r#"{"message":"Hi"}"#).unwrap(),
            serde_json::json!({"message": "Hi"})
        );
        assert!(matches!(parse_options("{oops"), Err(DialogError::InvalidArguments)));
    }

    #[test]
    fn options_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call.json");
        std::fs::write(&path, r#"{"message":"Saved"}"#).unwrap();
        let args = Args::try_parse_from([
            "xdialog".into(),
            "alert".into(),
            "--options-file".into(),
            path.into_os_string(),
        ])
        .unwrap();
        assert_eq!(
            read_call_options(&args).unwrap(),
            serde_json::json!({"message": "Saved"})
        );
    }
}
