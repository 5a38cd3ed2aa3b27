// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native tracker surface.
//
// The SDK reports its own failures through its own logging, so none of these
// methods return a `Result`. Callbacks may be invoked on any thread the SDK
// owns, hence the `Send` bounds.

use std::sync::Arc;

use serde_json::{Map, Value};
use tether_core::types::{Deeplink, InitCompleted, InstallAttribution, LogLevel, TrackedEvent};

/// One-shot continuation for attribution retrieval.
pub type AttributionCallback = Box<dyn FnOnce(InstallAttribution) + Send + 'static>;

/// One-shot continuation for deep link processing.
pub type DeeplinkCallback = Box<dyn FnOnce(Deeplink) + Send + 'static>;

/// Persistent listener, called once per completed initialisation.
pub type InitCompletedListener = Arc<dyn Fn(InitCompleted) + Send + Sync + 'static>;

/// Unified tracker that groups every native capability the bridge forwards to.
pub trait TrackerSdk: NativeTracker + NativeEvents + NativeEngagement + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Tracker lifecycle, identity, privacy and attribution.
pub trait NativeTracker {
    fn execute_advanced_instruction(&self, name: &str, value: &str);

    fn set_log_level(&self, level: LogLevel);

    fn set_sleep(&self, sleep: bool);

    fn set_app_limit_ad_tracking(&self, limit: bool);

    /// `None` clears a previously registered identifier.
    fn register_custom_device_identifier(&self, name: &str, value: Option<&str>);

    fn register_custom_string_value(&self, name: &str, value: Option<&str>);

    fn register_custom_bool_value(&self, name: &str, value: Option<bool>);

    fn register_custom_number_value(&self, name: &str, value: Option<f64>);

    fn register_identity_link(&self, name: &str, value: &str);

    fn enable_instant_apps(&self, instant_app_guid: &str);

    fn register_privacy_profile(&self, name: &str, keys: &[String]);

    fn set_privacy_profile_enabled(&self, name: &str, enabled: bool);

    /// Install or clear (`None`) the init-completed listener.
    fn set_init_completed_listener(&self, listener: Option<InitCompletedListener>);

    fn set_intelligent_consent_granted(&self, granted: bool);

    fn is_started(&self) -> bool;

    /// Start with an app GUID. A blank GUID is reported by the SDK itself.
    fn start_with_app_guid(&self, app_guid: &str);

    fn start_with_partner_name(&self, partner_name: &str);

    fn shutdown(&self, delete_data: bool);

    fn device_id(&self) -> String;

    /// Attribution known right now, without a server round trip.
    fn install_attribution(&self) -> InstallAttribution;

    fn retrieve_install_attribution(&self, callback: AttributionCallback);

    fn process_deeplink(&self, path: &str, callback: DeeplinkCallback);

    /// Same as `process_deeplink` with an explicit timeout in seconds.
    fn process_deeplink_with_timeout(&self, path: &str, timeout_secs: f64, callback: DeeplinkCallback);
}

/// Event sending and default event parameters.
pub trait NativeEvents {
    fn register_default_string_parameter(&self, name: &str, value: Option<&str>);

    fn register_default_bool_parameter(&self, name: &str, value: Option<bool>);

    fn register_default_number_parameter(&self, name: &str, value: Option<f64>);

    fn register_default_user_id(&self, user_id: Option<&str>);

    fn send(&self, name: &str);

    fn send_with_string(&self, name: &str, data: &str);

    fn send_with_dictionary(&self, name: &str, data: &Map<String, Value>);

    fn send_event(&self, event: TrackedEvent);
}

/// Push engagement.
pub trait NativeEngagement {
    fn register_push_token(&self, token: &str);

    fn set_push_enabled(&self, enabled: bool);
}
