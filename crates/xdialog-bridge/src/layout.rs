// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Which on-screen surface a dialog gets, and the bottom-sheet geometry rules.

use serde::{Deserialize, Serialize};

use xdialog_core::{DialogKind, PresentationMode, ResolvedStyle};

/// Default content-to-button gap for bottom sheets, in platform units.
pub const DEFAULT_SHEET_SPACING: f32 = 12.0;

/// Bottom sheets open between these fractions of the screen height.
const SHEET_MIN_FRACTION: f32 = 0.5;
const SHEET_MAX_FRACTION: f32 = 0.8;

/// Native surface used to render a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceLayout {
    /// Centered system alert.
    Alert,
    /// System action sheet; tapping an option answers the dialog.
    ActionSheet,
    /// Card-style page sheet with grabber and medium/large detents.
    PageSheet,
    /// Bottom sheet anchored to the screen edge.
    BottomSheet,
    /// Cover-vertical full-screen controller.
    FullScreen,
}

impl SurfaceLayout {
    /// Whether `contentButtonSpacing` applies to this layout.
    pub fn uses_content_spacing(&self) -> bool {
        matches!(self, Self::PageSheet | Self::BottomSheet | Self::FullScreen)
    }
}

/// Pick the surface for a kind in a mode.
pub fn layout_for(kind: DialogKind, mode: PresentationMode) -> SurfaceLayout {
    match (mode, kind) {
        (PresentationMode::Fullscreen, _) => SurfaceLayout::FullScreen,
        (PresentationMode::Basic, DialogKind::SingleSelect) => SurfaceLayout::ActionSheet,
        (PresentationMode::Basic, DialogKind::MultiSelect) => SurfaceLayout::PageSheet,
        (PresentationMode::Basic, DialogKind::Sheet) => SurfaceLayout::BottomSheet,
        (PresentationMode::Basic, _) => SurfaceLayout::Alert,
    }
}

/// Effective content-to-button gap, or `None` where the layout has no such gap
/// or the platform default applies.
pub fn content_button_spacing(style: &ResolvedStyle, layout: SurfaceLayout) -> Option<f32> {
    if !layout.uses_content_spacing() {
        return None;
    }
    match (style.content_button_spacing, layout) {
        (Some(gap), _) => Some(gap),
        (None, SurfaceLayout::BottomSheet) => Some(DEFAULT_SHEET_SPACING),
        (None, _) => None,
    }
}

/// Initial bottom-sheet height: the content height, clamped to 50%–80% of
/// the screen.
pub fn clamp_initial_sheet_height(screen_height: i32, content_height: i32) -> i32 {
    let min_height = (screen_height as f32 * SHEET_MIN_FRACTION) as i32;
    let max_height = (screen_height as f32 * SHEET_MAX_FRACTION) as i32;
    content_height.max(min_height).min(max_height)
}

/// Half-expanded ratio for a sheet of `desired_height`, clamped to
/// `[0.5, 0.8]`. A non-positive screen height yields 0.5.
pub fn half_expanded_ratio(screen_height: i32, desired_height: i32) -> f32 {
    if screen_height <= 0 {
        return SHEET_MIN_FRACTION;
    }
    let ratio = desired_height as f32 / screen_height as f32;
    ratio.clamp(SHEET_MIN_FRACTION, SHEET_MAX_FRACTION)
}
