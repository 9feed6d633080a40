// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// xdialog — Core types, style resolution, option normalization and error
// definitions shared across all crates.

pub mod config;
pub mod error;
pub mod logo;
pub mod options;
pub mod rejection;
pub mod style;
pub mod types;

pub use config::PluginConfig;
pub use error::DialogError;
pub use logo::LogoSource;
pub use style::{DialogStyleOptions, ResolvedStyle, Rgba};
pub use types::*;
