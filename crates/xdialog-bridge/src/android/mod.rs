// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android presenter via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`.
//
// ## Architecture notes
//
// Android dialogs are built in Java/Kotlin by a small host class,
// `org.hyperpolymath.xdialog.DialogHost`, which the app ships next to this
// library. Rust hands it the whole surface as JSON:
//
//     static void present(Activity activity, String sessionId, String surfaceJson)
//
// and the host reports every interaction back through two native methods
// exported below:
//
//     static native boolean nativeDispatch(String sessionId, String eventJson)
//     static native void nativeRelease(String sessionId)
//
// `eventJson` is a serialized `DialogEvent` (`{"type":"confirm"}`,
// `{"type":"optionTapped","value":"b"}`, ...). `nativeRelease` is for
// dialogs torn down without an answer (activity destroyed); the caller is
// then rejected as abandoned instead of waiting forever.
//
// Sinks for live dialogs are parked in a process-wide registry keyed by
// session id, because the host calls back through static JNI entry points
// that carry no Rust state.

#![cfg(target_os = "android")]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean};
use jni::{JNIEnv, JavaVM};

use xdialog_core::error::{DialogError, Result};
use xdialog_core::{DialogEvent, SessionId};
use xdialog_session::{Dispatch, EventSink};

use crate::traits::{Presenter, Surface};

/// Binary name of the Java host class.
const HOST_CLASS: &str = "org.hyperpolymath.xdialog.DialogHost";

const PRESENT_SIG: &str = "(Landroid/app/Activity;Ljava/lang/String;Ljava/lang/String;)V";

/// Convenience: map any `jni::errors::Error` into `DialogError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> DialogError {
    DialogError::Bridge(format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Attachment point
// ---------------------------------------------------------------------------

/// The VM and the Activity dialogs are attached to.
pub struct ActivityAttachment {
    vm: JavaVM,
    activity: GlobalRef,
}

impl ActivityAttachment {
    /// Use an explicit VM and Activity, e.g. from a host's `JNI_OnLoad` or
    /// a plugin's `load()` call.
    pub fn new(vm: JavaVM, activity: GlobalRef) -> Self {
        Self { vm, activity }
    }

    /// Take the VM and Activity published by the NDK glue code.
    ///
    /// Calls `ndk_context::android_context()`, which is set by `android_main`
    /// or `ANativeActivity_onCreate`.
    pub fn from_ndk_context() -> Result<Self> {
        let ctx = ndk_context::android_context();
        // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
        // The pointer is guaranteed valid for the lifetime of the process.
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
            .map_err(|e| jni_err("failed to obtain JavaVM", e))?;

        let ptr = ctx.context();
        if ptr.is_null() {
            return Err(DialogError::Bridge(
                "Android context is null, native activity not initialised".into(),
            ));
        }
        let activity = {
            let env = vm
                .attach_current_thread()
                .map_err(|e| jni_err("failed to attach JNI thread", e))?;
            // SAFETY: the NDK guarantees this pointer is a valid global
            // jobject for the hosting Activity.
            let local = unsafe { JObject::from_raw(ptr.cast()) };
            env.new_global_ref(local)
                .map_err(|e| jni_err("new_global_ref(activity)", e))?
        };
        Ok(Self { vm, activity })
    }
}

// ---------------------------------------------------------------------------
// Live-session registry
// ---------------------------------------------------------------------------

fn registry() -> MutexGuard<'static, HashMap<SessionId, EventSink>> {
    static SINKS: OnceLock<Mutex<HashMap<SessionId, EventSink>>> = OnceLock::new();
    SINKS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Route one host event to its session. Resolved sessions leave the registry.
fn route(session_id: &str, event_json: &str) -> Result<Dispatch> {
    let id: SessionId = session_id
        .parse()
        .map_err(|e| DialogError::Bridge(format!("bad session id {session_id:?}: {e}")))?;
    let event: DialogEvent = serde_json::from_str(event_json)?;

    let sink = registry()
        .get(&id)
        .cloned()
        .ok_or_else(|| DialogError::Bridge(format!("no live dialog for session {id}")))?;
    let outcome = sink.dispatch(event);
    if sink.is_resolved() {
        registry().remove(&id);
    }
    Ok(outcome)
}

fn release(session_id: &str) {
    let Ok(id) = session_id.parse::<SessionId>() else {
        return;
    };
    if let Some(sink) = registry().remove(&id) {
        if !sink.is_resolved() {
            tracing::warn!(session_id = %id, "dialog released before the user answered");
        }
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Android presenter backed by the Java `DialogHost`.
pub struct AndroidPresenter {
    attachment: ActivityAttachment,
}

impl AndroidPresenter {
    pub fn new(attachment: ActivityAttachment) -> Self {
        Self { attachment }
    }

    fn call_host(&self, session_id: &str, surface_json: &str) -> Result<()> {
        let mut env = self
            .attachment
            .vm
            .attach_current_thread()
            .map_err(|e| jni_err("failed to attach JNI thread", e))?;
        let activity = self.attachment.activity.as_obj();

        let outcome = host_present(&mut env, activity, session_id, surface_json);
        if env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        outcome
    }
}

/// Load `DialogHost` through the Activity's class loader (native threads
/// only see the system loader) and call `present`.
fn host_present(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
    session_id: &str,
    surface_json: &str,
) -> Result<()> {
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| jni_err("Activity.getClassLoader", e))?
        .l()
        .map_err(|e| jni_err("getClassLoader->l", e))?;
    let j_class_name: JString = env
        .new_string(HOST_CLASS)
        .map_err(|e| jni_err("new_string(host class)", e))?;
    let host: JClass = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&j_class_name)],
        )
        .map_err(|e| jni_err("ClassLoader.loadClass(DialogHost)", e))?
        .l()
        .map_err(|e| jni_err("loadClass->l", e))?
        .into();

    let j_session: JString = env
        .new_string(session_id)
        .map_err(|e| jni_err("new_string(session id)", e))?;
    let j_surface: JString = env
        .new_string(surface_json)
        .map_err(|e| jni_err("new_string(surface)", e))?;

    env.call_static_method(
        &host,
        "present",
        PRESENT_SIG,
        &[
            JValue::Object(activity),
            JValue::Object(&j_session),
            JValue::Object(&j_surface),
        ],
    )
    .map_err(|e| jni_err("DialogHost.present", e))?;
    Ok(())
}

impl Presenter for AndroidPresenter {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn present(&self, surface: Surface, sink: EventSink) -> Result<()> {
        let surface_json = serde_json::to_string(&surface)?;
        let session_id = surface.session_id;
        registry().insert(session_id, sink);

        let outcome = self.call_host(&session_id.to_string(), &surface_json);
        if outcome.is_err() {
            registry().remove(&session_id);
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// JNI exports called by DialogHost
// ---------------------------------------------------------------------------

fn read_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Option<String> {
    env.get_string(value).ok().map(String::from)
}

/// `static native boolean nativeDispatch(String sessionId, String eventJson)`
///
/// Returns `true` when the event reached a live session.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_hyperpolymath_xdialog_DialogHost_nativeDispatch<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    session_id: JString<'local>,
    event_json: JString<'local>,
) -> jboolean {
    let (Some(session_id), Some(event_json)) = (
        read_string(&mut env, &session_id),
        read_string(&mut env, &event_json),
    ) else {
        tracing::warn!("nativeDispatch called with unreadable strings");
        return JNI_FALSE;
    };
    match route(&session_id, &event_json) {
        Ok(outcome) => {
            tracing::debug!(%session_id, ?outcome, "host event dispatched");
            JNI_TRUE
        }
        Err(e) => {
            tracing::warn!(%session_id, error = %e, "host event dropped");
            JNI_FALSE
        }
    }
}

/// `static native void nativeRelease(String sessionId)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_hyperpolymath_xdialog_DialogHost_nativeRelease<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    session_id: JString<'local>,
) {
    if let Some(session_id) = read_string(&mut env, &session_id) {
        release(&session_id);
    }
}
