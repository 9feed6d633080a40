// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin dispatcher: the entry point a host bridge calls.
//
// One call runs parse -> style resolution -> layout -> session -> present ->
// await -> encode. Contract errors return before a session exists; anything
// after `present` is settled through the session's result slot.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use xdialog_core::error::{DialogError, Result};
use xdialog_core::style;
use xdialog_core::{DialogRequest, DialogResult, PluginConfig};
use xdialog_session::EventSink;

use crate::contract;
use crate::layout::layout_for;
use crate::traits::{Presenter, Surface};

/// Routes dialog calls to a presenter.
#[derive(Clone)]
pub struct DialogPlugin {
    presenter: Arc<dyn Presenter>,
    config: PluginConfig,
}

impl DialogPlugin {
    pub fn new(presenter: Arc<dyn Presenter>, config: PluginConfig) -> Self {
        Self { presenter, config }
    }

    /// Plugin backed by the native presenter for the target platform.
    pub fn with_platform_presenter(config: PluginConfig) -> Result<Self> {
        Ok(Self::new(crate::platform_presenter()?, config))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn platform_name(&self) -> &str {
        self.presenter.platform_name()
    }

    /// Handle one bridge call and return its JSON response.
    #[instrument(skip(self, args), fields(platform = self.presenter.platform_name()))]
    pub async fn call(&self, method: &str, args: Value) -> Result<Value> {
        let request = contract::parse_call(method, &args, &self.config)?;
        let result = self.present(request).await?;
        Ok(contract::encode_result(&result))
    }

    /// Show an already-validated request and wait for its single result.
    pub async fn present(&self, request: DialogRequest) -> Result<DialogResult> {
        let kind = request.kind();
        let mode = request.mode();
        let raw_style = &request.common().style;
        let resolved = style::resolve(raw_style);
        let degraded = style::degraded_fields(raw_style, &resolved);
        if !degraded.is_empty() {
            warn!(%kind, fields = ?degraded, "ignoring malformed style hints");
        }

        let layout = layout_for(kind, mode);
        if !self.presenter.supports(kind, layout) {
            warn!(%kind, ?layout, "presenter cannot render this dialog");
            return Err(DialogError::PlatformUnavailable);
        }

        let (sink, pending) = EventSink::open(request);
        let surface = Surface::new(sink.session_id(), sink.request(), resolved, layout);
        info!(
            session_id = %surface.session_id,
            %kind,
            mode = mode.keyword(),
            ?layout,
            "presenting dialog"
        );
        self.presenter.present(surface, sink)?;
        pending.await
    }

    pub async fn alert(&self, args: Value) -> Result<Value> {
        self.call("alert", args).await
    }

    pub async fn confirm(&self, args: Value) -> Result<Value> {
        self.call("confirm", args).await
    }

    pub async fn prompt(&self, args: Value) -> Result<Value> {
        self.call("prompt", args).await
    }

    pub async fn single_select(&self, args: Value) -> Result<Value> {
        self.call("singleSelect", args).await
    }

    pub async fn multi_select(&self, args: Value) -> Result<Value> {
        self.call("multiSelect", args).await
    }

    pub async fn sheet(&self, args: Value) -> Result<Value> {
        self.call("sheet", args).await
    }
}

impl std::fmt::Debug for DialogPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogPlugin")
            .field("platform", &self.presenter.platform_name())
            .field("config", &self.config)
            .finish()
    }
}
