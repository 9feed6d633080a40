// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS presenter via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Every dialog kind renders as
// a `UIAlertController`: alerts, confirms, prompts and sheets use the alert
// style, select dialogs use the action-sheet style. An action sheet closes on
// every tap, so selects that need several taps (multi-select, and single
// select outside the basic action sheet) are re-presented with check marks
// after each tap until the user confirms or cancels.
//
// `present` is called from an async worker. All UIKit work is hopped onto
// the main queue with `dispatch2::run_on_main`, which also hands us the
// `MainThreadMarker` UIKit constructors need.
//
// ## Unsafe code
//
// 1. **ObjC message sends** (`msg_send!`): selectors are UIKit public API
//    except the `titleTextColor` and `checked` keys on `UIAlertAction`, which
//    are private but long-stable KVC keys. All sends happen on the main thread.
//
// 2. **Block arguments** (`RcBlock`): UIKit copies the handler blocks, and
//    every closure owns what it captures, so no block outlives its data.

#![cfg(target_os = "ios")]

use std::ptr::NonNull;
use std::sync::Arc;

use block2::RcBlock;
use objc2::rc::{Retained, Weak};
use objc2::runtime::{AnyObject, Bool};
use objc2::{ClassType, MainThreadMarker, msg_send};
use objc2_foundation::{NSArray, NSNumber, NSString};
use objc2_ui_kit::{
    UIAlertAction, UIAlertActionStyle, UIAlertController, UIAlertControllerStyle,
    UIApplication, UIColor, UITextField, UIView, UIViewController,
};

use xdialog_core::error::{DialogError, Result};
use xdialog_core::{DialogRequest, Rgba};
use xdialog_session::EventSink;

use crate::layout::SurfaceLayout;
use crate::traits::{Presenter, Surface};

// ---------------------------------------------------------------------------
// Attachment point
// ---------------------------------------------------------------------------

/// Supplies the view controller dialogs are presented from.
///
/// Hosts that own their window hierarchy (a Capacitor-style bridge view
/// controller, a SwiftUI hosting controller) inject their own source.
pub trait ViewControllerSource: Send + Sync {
    fn view_controller(&self, mtm: MainThreadMarker) -> Result<Retained<UIViewController>>;
}

impl<F> ViewControllerSource for F
where
    F: Fn(MainThreadMarker) -> Result<Retained<UIViewController>> + Send + Sync,
{
    fn view_controller(&self, mtm: MainThreadMarker) -> Result<Retained<UIViewController>> {
        self(mtm)
    }
}

/// Top-most controller of the key window.
///
/// Uses the deprecated `keyWindow` property for broad iOS-version compat,
/// then walks `presentedViewController` so dialogs stack on top of any modal
/// that is already showing.
#[derive(Debug, Default)]
pub struct KeyWindowAttachment;

impl ViewControllerSource for KeyWindowAttachment {
    fn view_controller(&self, mtm: MainThreadMarker) -> Result<Retained<UIViewController>> {
        let app = UIApplication::sharedApplication(mtm);

        // SAFETY: msg_send! to well-known UIApplication / UIWindow selectors
        // (keyWindow, rootViewController) on the main thread.
        let root: Option<Retained<UIViewController>> = unsafe {
            let window: Option<Retained<AnyObject>> = msg_send![&app, keyWindow];
            window.and_then(|w| msg_send![&w, rootViewController])
        };
        let mut top =
            root.ok_or_else(|| DialogError::Bridge("no root view controller available".into()))?;

        loop {
            // SAFETY: presentedViewController is a plain UIViewController getter.
            let next: Option<Retained<UIViewController>> =
                unsafe { msg_send![&top, presentedViewController] };
            match next {
                Some(next) => top = next,
                None => return Ok(top),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// UIKit presenter.
pub struct IosPresenter {
    attachment: Arc<dyn ViewControllerSource>,
}

impl IosPresenter {
    pub fn new() -> Self {
        Self::with_attachment(KeyWindowAttachment)
    }

    pub fn with_attachment(attachment: impl ViewControllerSource + 'static) -> Self {
        Self {
            attachment: Arc::new(attachment),
        }
    }
}

impl Default for IosPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for IosPresenter {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn present(&self, surface: Surface, sink: EventSink) -> Result<()> {
        let attachment = Arc::clone(&self.attachment);
        dispatch2::run_on_main(move |mtm| {
            let host = attachment.view_controller(mtm)?;
            show(&host, Arc::new(surface), sink, mtm);
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Controller construction
// ---------------------------------------------------------------------------

/// Build and present the controller for the session's current state.
fn show(
    host: &Retained<UIViewController>,
    surface: Arc<Surface>,
    sink: EventSink,
    mtm: MainThreadMarker,
) {
    let request = Arc::clone(&surface.request);
    let labels = request.button_labels();
    let style = &surface.style;
    let controller_style = if request.kind().is_select() {
        UIAlertControllerStyle::ActionSheet
    } else {
        UIAlertControllerStyle::Alert
    };

    let alert = new_controller(request.title(), &request.body_text(), controller_style);
    if let Some(color) = style.button_color {
        set_tint(&alert, color);
    }
    if style.title_color.is_some()
        || style.message_color.is_some()
        || style.background_color.is_some()
        || style.title_font_size.is_some()
        || style.message_font_size.is_some()
        || style.button_font_size.is_some()
    {
        tracing::debug!(
            session_id = %surface.session_id,
            "system alerts ignore text and background styling"
        );
    }

    let mut focus_field = false;
    match request.as_ref() {
        DialogRequest::Alert(_) => {
            let sink = sink.clone();
            add_action(
                &alert,
                labels.primary,
                UIAlertActionStyle::Default,
                style.button_color,
                move || {
                    sink.confirm();
                },
            );
        }
        DialogRequest::Confirm(_) | DialogRequest::Sheet(_) => {
            add_cancel(&alert, &surface, &sink);
            let sink = sink.clone();
            add_action(
                &alert,
                labels.primary,
                UIAlertActionStyle::Default,
                style.button_color,
                move || {
                    sink.confirm();
                },
            );
        }
        DialogRequest::Prompt(prompt) => {
            add_text_field(
                &alert,
                prompt.input_placeholder.clone(),
                sink.snapshot().text,
            );
            focus_field = prompt.focus_input;
            add_cancel(&alert, &surface, &sink);
            let sink = sink.clone();
            let weak = Weak::from_retained(&alert);
            add_action(
                &alert,
                labels.primary,
                UIAlertActionStyle::Default,
                style.button_color,
                move || {
                    if let Some(text) = weak.load().and_then(|alert| first_field_text(&alert)) {
                        sink.text_changed(text);
                    }
                    sink.confirm();
                },
            );
        }
        DialogRequest::SingleSelect(_) | DialogRequest::MultiSelect(_) => {
            add_options(&alert, host, &surface, &sink, mtm);
        }
    }

    if controller_style == UIAlertControllerStyle::ActionSheet {
        anchor_popover(&alert, host);
    }
    present_over(host, &alert, focus_field);
}

/// One action per option; a tap either answers the dialog or re-presents it.
fn add_options(
    alert: &Retained<UIAlertController>,
    host: &Retained<UIViewController>,
    surface: &Arc<Surface>,
    sink: &EventSink,
    mtm: MainThreadMarker,
) {
    let request = &surface.request;
    let answers_on_tap = surface.layout == SurfaceLayout::ActionSheet;
    let snapshot = sink.snapshot();

    for option in request.options() {
        let value = option.value.clone();
        let host = host.clone();
        let surface_for_tap = Arc::clone(surface);
        let sink_for_tap = sink.clone();
        let action = add_action(
            alert,
            &option.label,
            UIAlertActionStyle::Default,
            surface.style.button_color,
            move || {
                sink_for_tap.option_tapped(value.clone());
                if answers_on_tap {
                    sink_for_tap.confirm();
                } else if !sink_for_tap.is_resolved() {
                    show(&host, Arc::clone(&surface_for_tap), sink_for_tap.clone(), mtm);
                }
            },
        );
        if snapshot.is_checked(&option.value) {
            set_value(&action, "checked", &NSNumber::new_bool(true));
        }
    }

    if !answers_on_tap {
        let sink = sink.clone();
        add_action(
            alert,
            request.button_labels().primary,
            UIAlertActionStyle::Default,
            surface.style.button_color,
            move || {
                sink.confirm();
            },
        );
    }
    add_cancel(alert, surface, sink);
}

fn add_cancel(alert: &Retained<UIAlertController>, surface: &Surface, sink: &EventSink) {
    let Some(label) = surface.request.button_labels().secondary else {
        return;
    };
    let sink = sink.clone();
    add_action(
        alert,
        label,
        UIAlertActionStyle::Cancel,
        surface.style.cancel_button_color,
        move || {
            sink.cancel();
        },
    );
}

fn new_controller(
    title: Option<&str>,
    message: &str,
    style: UIAlertControllerStyle,
) -> Retained<UIAlertController> {
    let title = title.filter(|t| !t.is_empty()).map(NSString::from_str);
    let message = (!message.is_empty()).then(|| NSString::from_str(message));
    // SAFETY: class constructor on the main thread; nil title/message are
    // documented as valid.
    unsafe {
        msg_send![
            UIAlertController::class(),
            alertControllerWithTitle: title.as_deref(),
            message: message.as_deref(),
            preferredStyle: style
        ]
    }
}

fn add_action(
    alert: &Retained<UIAlertController>,
    title: &str,
    style: UIAlertActionStyle,
    color: Option<Rgba>,
    handler: impl Fn() + 'static,
) -> Retained<UIAlertAction> {
    let block = RcBlock::new(move |_action: NonNull<UIAlertAction>| handler());
    let title = NSString::from_str(title);
    // SAFETY: UIKit copies the handler block; the block owns its captures.
    let action: Retained<UIAlertAction> = unsafe {
        msg_send![
            UIAlertAction::class(),
            actionWithTitle: &*title,
            style: style,
            handler: &*block
        ]
    };
    if let Some(color) = color {
        set_value(&action, "titleTextColor", &ui_color(color));
    }
    // SAFETY: addAction: takes a non-nil UIAlertAction.
    let _: () = unsafe { msg_send![&**alert, addAction: &*action] };
    action
}

fn add_text_field(
    alert: &Retained<UIAlertController>,
    placeholder: Option<String>,
    text: Option<String>,
) {
    let configure = RcBlock::new(move |field: NonNull<UITextField>| {
        // SAFETY: UIKit passes a live text field for the duration of the call.
        let field = unsafe { field.as_ref() };
        if let Some(placeholder) = &placeholder {
            let placeholder = NSString::from_str(placeholder);
            // SAFETY: setPlaceholder: on a live UITextField.
            let _: () = unsafe { msg_send![field, setPlaceholder: &*placeholder] };
        }
        if let Some(text) = &text {
            let text = NSString::from_str(text);
            // SAFETY: setText: on a live UITextField.
            let _: () = unsafe { msg_send![field, setText: &*text] };
        }
    });
    // SAFETY: the configuration block is copied by UIKit and called on the
    // main thread before presentation.
    let _: () = unsafe { msg_send![&**alert, addTextFieldWithConfigurationHandler: &*configure] };
}

fn first_field(alert: &UIAlertController) -> Option<Retained<UITextField>> {
    // SAFETY: textFields is a nullable NSArray<UITextField *> getter.
    let fields: Option<Retained<NSArray<UITextField>>> = unsafe { msg_send![alert, textFields] };
    fields.and_then(|fields| fields.firstObject())
}

fn first_field_text(alert: &UIAlertController) -> Option<String> {
    let field = first_field(alert)?;
    // SAFETY: text is a nullable NSString getter on UITextField.
    let text: Option<Retained<NSString>> = unsafe { msg_send![&*field, text] };
    Some(text.map(|t| t.to_string()).unwrap_or_default())
}

/// Action sheets on iPad are popovers and need a source view.
fn anchor_popover(alert: &Retained<UIAlertController>, host: &Retained<UIViewController>) {
    // SAFETY: popoverPresentationController and view are nullable getters;
    // setSourceView: accepts any UIView.
    unsafe {
        let popover: Option<Retained<AnyObject>> =
            msg_send![&**alert, popoverPresentationController];
        let view: Option<Retained<UIView>> = msg_send![&**host, view];
        if let (Some(popover), Some(view)) = (popover, view) {
            let _: () = msg_send![&*popover, setSourceView: &*view];
        }
    }
}

fn present_over(
    host: &Retained<UIViewController>,
    alert: &Retained<UIAlertController>,
    focus_field: bool,
) {
    let completion = focus_field.then(|| {
        let weak = Weak::from_retained(alert);
        RcBlock::new(move || {
            if let Some(field) = weak.load().and_then(|alert| first_field(&alert)) {
                // SAFETY: becomeFirstResponder on a live UITextField, main thread.
                let _: Bool = unsafe { msg_send![&*field, becomeFirstResponder] };
            }
        })
    });
    // SAFETY: presentViewController:animated:completion: from the host
    // controller on the main thread; the completion block may be nil.
    let _: () = unsafe {
        msg_send![
            &**host,
            presentViewController: &**alert,
            animated: Bool::YES,
            completion: completion.as_deref()
        ]
    };
}

// ---------------------------------------------------------------------------
// Styling helpers
// ---------------------------------------------------------------------------

fn ui_color(color: Rgba) -> Retained<UIColor> {
    let (r, g, b, a) = color.components();
    // SAFETY: colorWithRed:green:blue:alpha: takes CGFloat (f64 on 64-bit).
    unsafe { msg_send![UIColor::class(), colorWithRed: r, green: g, blue: b, alpha: a] }
}

fn set_tint(alert: &Retained<UIAlertController>, color: Rgba) {
    let color = ui_color(color);
    // SAFETY: view is a UIViewController getter; setTintColor: accepts any UIColor.
    unsafe {
        let view: Option<Retained<UIView>> = msg_send![&**alert, view];
        if let Some(view) = view {
            let _: () = msg_send![&*view, setTintColor: &*color];
        }
    }
}

/// Key-value coding setter for keys UIKit does not expose as properties.
fn set_value(target: &AnyObject, key: &str, value: &AnyObject) {
    let key = NSString::from_str(key);
    // SAFETY: only called with keys UIAlertAction is known to accept.
    let _: () = unsafe { msg_send![target, setValue: value, forKey: &*key] };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_name_is_ios() {
        assert_eq!(IosPresenter::new().platform_name(), "iOS");
    }
}
