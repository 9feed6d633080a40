// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// xdialog — bridge surface, plugin dispatcher and native presenters.
//
// The `Presenter` trait is the seam between the platform-neutral session
// logic and UIKit (iOS, `objc2`), the JVM (Android, `jni`) or native message
// boxes (desktop, `rfd`). Hosts may also bring their own presenter.

pub mod contract;
pub mod layout;
pub mod plugin;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

use std::sync::Arc;

use xdialog_core::error::Result;

pub use layout::{SurfaceLayout, layout_for};
pub use plugin::DialogPlugin;
pub use traits::{Presenter, Surface};

/// Build the presenter for the target operating system.
///
/// On Android this needs the Activity published by the NDK glue; hosts that
/// obtain it another way construct `AndroidPresenter` themselves.
pub fn platform_presenter() -> Result<Arc<dyn Presenter>> {
    #[cfg(target_os = "ios")]
    {
        Ok(Arc::new(ios::IosPresenter::new()))
    }
    #[cfg(target_os = "android")]
    {
        let attachment = android::ActivityAttachment::from_ndk_context()?;
        Ok(Arc::new(android::AndroidPresenter::new(attachment)))
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Ok(Arc::new(desktop::DesktopPresenter::new()))
    }
}
