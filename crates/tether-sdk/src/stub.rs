// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub tracker for desktop/CI builds where the native SDK is unavailable.
//
// Nothing leaves the process. Calls are logged and enough state is kept to
// answer queries. Callbacks fire on a short-lived thread, so callers see the
// same cross-thread delivery they would get from the real SDK.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use tether_core::types::{
    Deeplink, InitCompleted, InstallAttribution, LogLevel, TrackedEvent, is_blank,
};
use tracing::{debug, error, info, warn};

use crate::traits::*;

#[derive(Default)]
struct StubState {
    started: bool,
    device_id: Option<String>,
    privacy_profiles: HashMap<String, (Vec<String>, bool)>,
    events_sent: u64,
    init_listener: Option<InitCompletedListener>,
}

/// In-process tracker returned on non-mobile platforms.
#[derive(Default)]
pub struct StubSdk {
    state: Mutex<StubState>,
}

impl StubSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events sent since construction.
    pub fn events_sent(&self) -> u64 {
        self.state().events_sent
    }

    /// Whether the named privacy profile is enabled, `None` if never registered.
    pub fn privacy_profile_enabled(&self, name: &str) -> Option<bool> {
        self.state().privacy_profiles.get(name).map(|(_, enabled)| *enabled)
    }

    fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self, via: &str, id: &str) {
        let listener = {
            let mut state = self.state();
            if state.started {
                warn!(via, "tracker already started, ignoring");
                return;
            }
            state.started = true;
            state.init_listener.clone()
        };
        info!(via, id, "stub tracker started");
        if let Some(listener) = listener {
            on_callback_thread(move || listener(InitCompleted::default()));
        }
    }

    fn count_event(&self, name: &str) {
        let mut state = self.state();
        if !state.started {
            warn!(name, "event sent before start, dropping");
            return;
        }
        state.events_sent += 1;
        info!(name, total = state.events_sent, "event sent");
    }
}

/// Run a callback on a fresh thread, standing in for the SDK's worker.
fn on_callback_thread(f: impl FnOnce() + Send + 'static) {
    let spawned = std::thread::Builder::new()
        .name("tether-stub-callback".into())
        .spawn(f);
    if let Err(e) = spawned {
        error!(error = %e, "failed to spawn stub callback thread, callback dropped");
    }
}

impl TrackerSdk for StubSdk {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeTracker for StubSdk {
    fn execute_advanced_instruction(&self, name: &str, value: &str) {
        debug!(name, value, "advanced instruction");
    }

    fn set_log_level(&self, level: LogLevel) {
        debug!(%level, "log level set");
    }

    fn set_sleep(&self, sleep: bool) {
        debug!(sleep, "sleep set");
    }

    fn set_app_limit_ad_tracking(&self, limit: bool) {
        debug!(limit, "app limit ad tracking set");
    }

    fn register_custom_device_identifier(&self, name: &str, value: Option<&str>) {
        debug!(name, ?value, "custom device identifier registered");
    }

    fn register_custom_string_value(&self, name: &str, value: Option<&str>) {
        debug!(name, ?value, "custom value registered");
    }

    fn register_custom_bool_value(&self, name: &str, value: Option<bool>) {
        debug!(name, ?value, "custom value registered");
    }

    fn register_custom_number_value(&self, name: &str, value: Option<f64>) {
        debug!(name, ?value, "custom value registered");
    }

    fn register_identity_link(&self, name: &str, value: &str) {
        if is_blank(name) {
            warn!("identity link with blank name ignored");
            return;
        }
        debug!(name, value, "identity link registered");
    }

    fn enable_instant_apps(&self, instant_app_guid: &str) {
        debug!(instant_app_guid, "instant apps enabled");
    }

    fn register_privacy_profile(&self, name: &str, keys: &[String]) {
        self.state()
            .privacy_profiles
            .insert(name.to_owned(), (keys.to_vec(), false));
    }

    fn set_privacy_profile_enabled(&self, name: &str, enabled: bool) {
        match self.state().privacy_profiles.get_mut(name) {
            Some(profile) => profile.1 = enabled,
            None => warn!(name, "unknown privacy profile"),
        }
    }

    fn set_init_completed_listener(&self, listener: Option<InitCompletedListener>) {
        self.state().init_listener = listener;
    }

    fn set_intelligent_consent_granted(&self, granted: bool) {
        debug!(granted, "intelligent consent set");
    }

    fn is_started(&self) -> bool {
        self.state().started
    }

    fn start_with_app_guid(&self, app_guid: &str) {
        if is_blank(app_guid) {
            error!("start failed: app guid is blank");
            return;
        }
        self.start("app_guid", app_guid);
    }

    fn start_with_partner_name(&self, partner_name: &str) {
        if is_blank(partner_name) {
            error!("start failed: partner name is blank");
            return;
        }
        self.start("partner_name", partner_name);
    }

    fn shutdown(&self, delete_data: bool) {
        let mut state = self.state();
        if delete_data {
            *state = StubState::default();
        } else {
            state.started = false;
        }
        info!(delete_data, "stub tracker shut down");
    }

    fn device_id(&self) -> String {
        self.state()
            .device_id
            .get_or_insert_with(|| format!("KA{}", uuid::Uuid::new_v4().simple()))
            .clone()
    }

    fn install_attribution(&self) -> InstallAttribution {
        InstallAttribution::default()
    }

    fn retrieve_install_attribution(&self, callback: AttributionCallback) {
        let attribution = InstallAttribution {
            retrieved: true,
            first_install: true,
            ..Default::default()
        };
        on_callback_thread(move || callback(attribution));
    }

    fn process_deeplink(&self, path: &str, callback: DeeplinkCallback) {
        let deeplink = Deeplink {
            destination: path.to_owned(),
            raw: Map::new(),
        };
        on_callback_thread(move || callback(deeplink));
    }

    fn process_deeplink_with_timeout(&self, path: &str, timeout_secs: f64, callback: DeeplinkCallback) {
        debug!(path, timeout_secs, "processing deep link");
        self.process_deeplink(path, callback);
    }
}

impl NativeEvents for StubSdk {
    fn register_default_string_parameter(&self, name: &str, value: Option<&str>) {
        debug!(name, ?value, "default event parameter registered");
    }

    fn register_default_bool_parameter(&self, name: &str, value: Option<bool>) {
        debug!(name, ?value, "default event parameter registered");
    }

    fn register_default_number_parameter(&self, name: &str, value: Option<f64>) {
        debug!(name, ?value, "default event parameter registered");
    }

    fn register_default_user_id(&self, user_id: Option<&str>) {
        debug!(?user_id, "default user id registered");
    }

    fn send(&self, name: &str) {
        self.count_event(name);
    }

    fn send_with_string(&self, name: &str, data: &str) {
        debug!(name, data, "event payload");
        self.count_event(name);
    }

    fn send_with_dictionary(&self, name: &str, data: &Map<String, Value>) {
        debug!(name, keys = data.len(), "event payload");
        self.count_event(name);
    }

    fn send_event(&self, event: TrackedEvent) {
        debug!(
            name = %event.name,
            keys = event.data.len(),
            receipt = event.google_play_receipt.is_some(),
            "event payload"
        );
        self.count_event(&event.name);
    }
}

impl NativeEngagement for StubSdk {
    fn register_push_token(&self, token: &str) {
        debug!(token, "push token registered");
    }

    fn set_push_enabled(&self, enabled: bool) {
        debug!(enabled, "push enabled set");
    }
}
