// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call-recording tracker used as a test double.
//
// Every trait call is appended to a log as an `SdkCall`. Continuations are
// parked instead of fired so tests decide when, and on which thread, they
// complete.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use tether_core::types::{Deeplink, InitCompleted, InstallAttribution, LogLevel, TrackedEvent};

use crate::traits::*;

/// One recorded call into the tracker surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    ExecuteAdvancedInstruction { name: String, value: String },
    SetLogLevel(LogLevel),
    SetSleep(bool),
    SetAppLimitAdTracking(bool),
    RegisterCustomDeviceIdentifier { name: String, value: Option<String> },
    RegisterCustomStringValue { name: String, value: Option<String> },
    RegisterCustomBoolValue { name: String, value: Option<bool> },
    RegisterCustomNumberValue { name: String, value: Option<f64> },
    RegisterIdentityLink { name: String, value: String },
    EnableInstantApps(String),
    RegisterPrivacyProfile { name: String, keys: Vec<String> },
    SetPrivacyProfileEnabled { name: String, enabled: bool },
    SetInitCompletedListener { installed: bool },
    SetIntelligentConsentGranted(bool),
    IsStarted,
    StartWithAppGuid(String),
    StartWithPartnerName(String),
    Shutdown { delete_data: bool },
    DeviceId,
    InstallAttribution,
    RetrieveInstallAttribution,
    ProcessDeeplink { path: String, timeout_secs: Option<f64> },
    RegisterDefaultStringParameter { name: String, value: Option<String> },
    RegisterDefaultBoolParameter { name: String, value: Option<bool> },
    RegisterDefaultNumberParameter { name: String, value: Option<f64> },
    RegisterDefaultUserId(Option<String>),
    Send(String),
    SendWithString { name: String, data: String },
    SendWithDictionary { name: String, data: Map<String, Value> },
    SendEvent(TrackedEvent),
    RegisterPushToken(String),
    SetPushEnabled(bool),
}

/// Tracker double that records calls and parks continuations.
#[derive(Default)]
pub struct RecordingSdk {
    calls: Mutex<Vec<SdkCall>>,
    started: Mutex<bool>,
    device_id: Mutex<String>,
    attribution: Mutex<InstallAttribution>,
    pending_attribution: Mutex<Vec<AttributionCallback>>,
    pending_deeplinks: Mutex<Vec<DeeplinkCallback>>,
    init_listener: Mutex<Option<InitCompletedListener>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_started(self, started: bool) -> Self {
        *lock(&self.started) = started;
        self
    }

    pub fn with_device_id(self, device_id: &str) -> Self {
        *lock(&self.device_id) = device_id.to_owned();
        self
    }

    pub fn with_attribution(self, attribution: InstallAttribution) -> Self {
        *lock(&self.attribution) = attribution;
        self
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<SdkCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Complete every parked attribution continuation. Returns how many fired.
    pub fn complete_attribution(&self, attribution: InstallAttribution) -> usize {
        let pending = std::mem::take(&mut *lock(&self.pending_attribution));
        let fired = pending.len();
        for callback in pending {
            callback(attribution.clone());
        }
        fired
    }

    /// Complete every parked deep link continuation. Returns how many fired.
    pub fn complete_deeplinks(&self, deeplink: Deeplink) -> usize {
        let pending = std::mem::take(&mut *lock(&self.pending_deeplinks));
        let fired = pending.len();
        for callback in pending {
            callback(deeplink.clone());
        }
        fired
    }

    /// Invoke the installed init listener, if any.
    pub fn fire_init_completed(&self, init: InitCompleted) -> bool {
        let listener = lock(&self.init_listener).clone();
        match listener {
            Some(listener) => {
                listener(init);
                true
            }
            None => false,
        }
    }

    fn record(&self, call: SdkCall) {
        lock(&self.calls).push(call);
    }
}

impl TrackerSdk for RecordingSdk {
    fn platform_name(&self) -> &str {
        "Recording"
    }
}

impl NativeTracker for RecordingSdk {
    fn execute_advanced_instruction(&self, name: &str, value: &str) {
        self.record(SdkCall::ExecuteAdvancedInstruction {
            name: name.into(),
            value: value.into(),
        });
    }

    fn set_log_level(&self, level: LogLevel) {
        self.record(SdkCall::SetLogLevel(level));
    }

    fn set_sleep(&self, sleep: bool) {
        self.record(SdkCall::SetSleep(sleep));
    }

    fn set_app_limit_ad_tracking(&self, limit: bool) {
        self.record(SdkCall::SetAppLimitAdTracking(limit));
    }

    fn register_custom_device_identifier(&self, name: &str, value: Option<&str>) {
        self.record(SdkCall::RegisterCustomDeviceIdentifier {
            name: name.into(),
            value: value.map(Into::into),
        });
    }

    fn register_custom_string_value(&self, name: &str, value: Option<&str>) {
        self.record(SdkCall::RegisterCustomStringValue {
            name: name.into(),
            value: value.map(Into::into),
        });
    }

    fn register_custom_bool_value(&self, name: &str, value: Option<bool>) {
        self.record(SdkCall::RegisterCustomBoolValue {
            name: name.into(),
            value,
        });
    }

    fn register_custom_number_value(&self, name: &str, value: Option<f64>) {
        self.record(SdkCall::RegisterCustomNumberValue {
            name: name.into(),
            value,
        });
    }

    fn register_identity_link(&self, name: &str, value: &str) {
        self.record(SdkCall::RegisterIdentityLink {
            name: name.into(),
            value: value.into(),
        });
    }

    fn enable_instant_apps(&self, instant_app_guid: &str) {
        self.record(SdkCall::EnableInstantApps(instant_app_guid.into()));
    }

    fn register_privacy_profile(&self, name: &str, keys: &[String]) {
        self.record(SdkCall::RegisterPrivacyProfile {
            name: name.into(),
            keys: keys.to_vec(),
        });
    }

    fn set_privacy_profile_enabled(&self, name: &str, enabled: bool) {
        self.record(SdkCall::SetPrivacyProfileEnabled {
            name: name.into(),
            enabled,
        });
    }

    fn set_init_completed_listener(&self, listener: Option<InitCompletedListener>) {
        self.record(SdkCall::SetInitCompletedListener {
            installed: listener.is_some(),
        });
        *lock(&self.init_listener) = listener;
    }

    fn set_intelligent_consent_granted(&self, granted: bool) {
        self.record(SdkCall::SetIntelligentConsentGranted(granted));
    }

    fn is_started(&self) -> bool {
        self.record(SdkCall::IsStarted);
        *lock(&self.started)
    }

    fn start_with_app_guid(&self, app_guid: &str) {
        self.record(SdkCall::StartWithAppGuid(app_guid.into()));
    }

    fn start_with_partner_name(&self, partner_name: &str) {
        self.record(SdkCall::StartWithPartnerName(partner_name.into()));
    }

    fn shutdown(&self, delete_data: bool) {
        self.record(SdkCall::Shutdown { delete_data });
    }

    fn device_id(&self) -> String {
        self.record(SdkCall::DeviceId);
        lock(&self.device_id).clone()
    }

    fn install_attribution(&self) -> InstallAttribution {
        self.record(SdkCall::InstallAttribution);
        lock(&self.attribution).clone()
    }

    fn retrieve_install_attribution(&self, callback: AttributionCallback) {
        self.record(SdkCall::RetrieveInstallAttribution);
        lock(&self.pending_attribution).push(callback);
    }

    fn process_deeplink(&self, path: &str, callback: DeeplinkCallback) {
        self.record(SdkCall::ProcessDeeplink {
            path: path.into(),
            timeout_secs: None,
        });
        lock(&self.pending_deeplinks).push(callback);
    }

    fn process_deeplink_with_timeout(&self, path: &str, timeout_secs: f64, callback: DeeplinkCallback) {
        self.record(SdkCall::ProcessDeeplink {
            path: path.into(),
            timeout_secs: Some(timeout_secs),
        });
        lock(&self.pending_deeplinks).push(callback);
    }
}

impl NativeEvents for RecordingSdk {
    fn register_default_string_parameter(&self, name: &str, value: Option<&str>) {
        self.record(SdkCall::RegisterDefaultStringParameter {
            name: name.into(),
            value: value.map(Into::into),
        });
    }

    fn register_default_bool_parameter(&self, name: &str, value: Option<bool>) {
        self.record(SdkCall::RegisterDefaultBoolParameter {
            name: name.into(),
            value,
        });
    }

    fn register_default_number_parameter(&self, name: &str, value: Option<f64>) {
        self.record(SdkCall::RegisterDefaultNumberParameter {
            name: name.into(),
            value,
        });
    }

    fn register_default_user_id(&self, user_id: Option<&str>) {
        self.record(SdkCall::RegisterDefaultUserId(user_id.map(Into::into)));
    }

    fn send(&self, name: &str) {
        self.record(SdkCall::Send(name.into()));
    }

    fn send_with_string(&self, name: &str, data: &str) {
        self.record(SdkCall::SendWithString {
            name: name.into(),
            data: data.into(),
        });
    }

    fn send_with_dictionary(&self, name: &str, data: &Map<String, Value>) {
        self.record(SdkCall::SendWithDictionary {
            name: name.into(),
            data: data.clone(),
        });
    }

    fn send_event(&self, event: TrackedEvent) {
        self.record(SdkCall::SendEvent(event));
    }
}

impl NativeEngagement for RecordingSdk {
    fn register_push_token(&self, token: &str) {
        self.record(SdkCall::RegisterPushToken(token.into()));
    }

    fn set_push_enabled(&self, enabled: bool) {
        self.record(SdkCall::SetPushEnabled(enabled));
    }
}
