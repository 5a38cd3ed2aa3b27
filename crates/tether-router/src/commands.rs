// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The standard command surface exposed to the web view.
//
// Each action maps to exactly one tracker call. Action names and argument
// order are a contract with existing JavaScript call sites and must not
// change.

use std::sync::Arc;

use serde_json::{Map, Value};
use tether_core::error::Result;
use tether_core::types::{
    Deeplink, InitCompleted, InstallAttribution, LogLevel, TrackedEvent, is_blank,
};
use tracing::warn;

use crate::decode::{Args, Decoder};
use crate::descriptor::{CommandDescriptor, CommandTable};
use crate::reply::Reply;
use crate::router::BridgeContext;

/// Deep link timeout in seconds when the caller's value is missing or not a
/// number.
pub const DEFAULT_DEEPLINK_TIMEOUT_SECS: f64 = 10.0;

const NONE: &[Decoder] = &[];
const STR: &[Decoder] = &[Decoder::Str("")];
const OPT_STR: &[Decoder] = &[Decoder::OptStr];
const BOOL: &[Decoder] = &[Decoder::Bool(false)];
const STR_STR: &[Decoder] = &[Decoder::Str(""), Decoder::Str("")];
const STR_OPT_STR: &[Decoder] = &[Decoder::Str(""), Decoder::OptStr];
const STR_OPT_BOOL: &[Decoder] = &[Decoder::Str(""), Decoder::OptBool];
const STR_OPT_NUMBER: &[Decoder] = &[Decoder::Str(""), Decoder::OptNumber];
const STR_BOOL: &[Decoder] = &[Decoder::Str(""), Decoder::Bool(false)];
const STR_STRINGS: &[Decoder] = &[Decoder::Str(""), Decoder::StringArray];
const STR_OBJECT: &[Decoder] = &[Decoder::Str(""), Decoder::Object];
const OBJECT: &[Decoder] = &[Decoder::Object];
const IGNORED: &[Decoder] = &[Decoder::Ignored];
const LISTENER: &[Decoder] = &[Decoder::Bool(true)];
const START: &[Decoder] = &[Decoder::Str(""), Decoder::Ignored, Decoder::Str("")];
const DEEPLINK_WITH_TIMEOUT: &[Decoder] = &[
    Decoder::Str(""),
    Decoder::Number(DEFAULT_DEEPLINK_TIMEOUT_SECS),
];

/// Every action the bridge understands.
pub const STANDARD_COMMANDS: &[CommandDescriptor] = &[
    // -- Tracker configuration --
    CommandDescriptor::fire("executeAdvancedInstruction", STR_STR, execute_advanced_instruction),
    CommandDescriptor::fire("setLogLevel", STR, set_log_level),
    CommandDescriptor::fire("setSleep", BOOL, set_sleep),
    CommandDescriptor::fire("setAppLimitAdTracking", BOOL, set_app_limit_ad_tracking),
    // -- Identity --
    CommandDescriptor::fire("registerCustomDeviceIdentifier", STR_OPT_STR, register_custom_device_identifier),
    CommandDescriptor::fire("registerCustomStringValue", STR_OPT_STR, register_custom_string_value),
    CommandDescriptor::fire("registerCustomBoolValue", STR_OPT_BOOL, register_custom_bool_value),
    CommandDescriptor::fire("registerCustomNumberValue", STR_OPT_NUMBER, register_custom_number_value),
    CommandDescriptor::fire("registerIdentityLink", STR_STR, register_identity_link),
    CommandDescriptor::fire("enableAndroidInstantApps", STR, enable_android_instant_apps),
    // -- Other platforms --
    CommandDescriptor::unavailable("enableIosAppClips", IGNORED),
    CommandDescriptor::unavailable("enableIosAtt", IGNORED),
    CommandDescriptor::unavailable("setIosAttAuthorizationWaitTime", IGNORED),
    CommandDescriptor::unavailable("setIosAttAuthorizationAutoRequest", IGNORED),
    // -- Privacy --
    CommandDescriptor::fire("registerPrivacyProfile", STR_STRINGS, register_privacy_profile),
    CommandDescriptor::fire("setPrivacyProfileEnabled", STR_BOOL, set_privacy_profile_enabled),
    CommandDescriptor::fire("setInitCompletedListener", LISTENER, set_init_completed_listener),
    CommandDescriptor::fire("setIntelligentConsentGranted", BOOL, set_intelligent_consent_granted),
    // -- Lifecycle --
    CommandDescriptor::reply("getStarted", NONE, get_started),
    CommandDescriptor::fire("start", START, start),
    CommandDescriptor::fire("shutdown", BOOL, shutdown),
    // -- Queries --
    CommandDescriptor::reply("getDeviceId", NONE, get_device_id),
    CommandDescriptor::reply("getInstallAttribution", NONE, get_install_attribution),
    CommandDescriptor::reply("retrieveInstallAttribution", NONE, retrieve_install_attribution),
    CommandDescriptor::reply("processDeeplink", STR, process_deeplink),
    CommandDescriptor::reply("processDeeplinkWithOverrideTimeout", DEEPLINK_WITH_TIMEOUT, process_deeplink_with_override_timeout),
    // -- Engagement --
    CommandDescriptor::fire("registerPushToken", STR, register_push_token),
    CommandDescriptor::fire("setPushEnabled", BOOL, set_push_enabled),
    // -- Events --
    CommandDescriptor::fire("registerDefaultEventStringParameter", STR_OPT_STR, register_default_event_string_parameter),
    CommandDescriptor::fire("registerDefaultEventBoolParameter", STR_OPT_BOOL, register_default_event_bool_parameter),
    CommandDescriptor::fire("registerDefaultEventNumberParameter", STR_OPT_NUMBER, register_default_event_number_parameter),
    CommandDescriptor::fire("registerDefaultEventUserId", OPT_STR, register_default_event_user_id),
    CommandDescriptor::fire("sendEvent", STR, send_event),
    CommandDescriptor::fire("sendEventWithString", STR_STR, send_event_with_string),
    CommandDescriptor::fire("sendEventWithDictionary", STR_OBJECT, send_event_with_dictionary),
    CommandDescriptor::fire("sendEventWithEvent", OBJECT, send_event_with_event),
];

/// Build the table holding [`STANDARD_COMMANDS`].
pub fn standard_table() -> Result<CommandTable> {
    let mut table = CommandTable::new();
    for descriptor in STANDARD_COMMANDS {
        table.register(*descriptor)?;
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tracker configuration
// ---------------------------------------------------------------------------

fn execute_advanced_instruction(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.execute_advanced_instruction(args.str(0), args.str(1));
}

fn set_log_level(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_log_level(LogLevel::from_name(args.str(0)));
}

fn set_sleep(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_sleep(args.flag(0));
}

fn set_app_limit_ad_tracking(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_app_limit_ad_tracking(args.flag(0));
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

fn register_custom_device_identifier(ctx: &BridgeContext, args: &Args) {
    ctx.sdk
        .register_custom_device_identifier(args.str(0), args.opt_str(1));
}

fn register_custom_string_value(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_custom_string_value(args.str(0), args.opt_str(1));
}

fn register_custom_bool_value(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_custom_bool_value(args.str(0), args.opt_flag(1));
}

fn register_custom_number_value(ctx: &BridgeContext, args: &Args) {
    ctx.sdk
        .register_custom_number_value(args.str(0), args.opt_number(1));
}

fn register_identity_link(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_identity_link(args.str(0), args.str(1));
}

fn enable_android_instant_apps(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.enable_instant_apps(args.str(0));
}

// ---------------------------------------------------------------------------
// Privacy
// ---------------------------------------------------------------------------

fn register_privacy_profile(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_privacy_profile(args.str(0), args.strings(1));
}

fn set_privacy_profile_enabled(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_privacy_profile_enabled(args.str(0), args.flag(1));
}

/// `true` installs a listener that pushes each init-completed payload to the
/// configured topic; `false` removes it.
fn set_init_completed_listener(ctx: &BridgeContext, args: &Args) {
    if !args.flag(0) {
        ctx.sdk.set_init_completed_listener(None);
        return;
    }

    let notifier = Arc::clone(&ctx.notifier);
    let topic = ctx.config.init_completed_topic.clone();
    ctx.sdk
        .set_init_completed_listener(Some(Arc::new(move |init: InitCompleted| {
            match serde_json::to_value(init) {
                Ok(payload) => notifier.notify(&topic, payload),
                Err(e) => warn!(error = %e, "init-completed payload failed to serialize"),
            }
        })));
}

fn set_intelligent_consent_granted(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_intelligent_consent_granted(args.flag(0));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

fn get_started(ctx: &BridgeContext, _args: &Args, reply: Reply) {
    reply.success(ctx.sdk.is_started().to_string());
}

/// Prefer the app GUID, then the partner name. With neither, start with an
/// empty GUID so the SDK reports the problem itself. Position 1 is the iOS
/// GUID and is unused here.
fn start(ctx: &BridgeContext, args: &Args) {
    let app_guid = args.str(0);
    let partner_name = args.str(2);
    if !is_blank(app_guid) {
        ctx.sdk.start_with_app_guid(app_guid);
    } else if !is_blank(partner_name) {
        ctx.sdk.start_with_partner_name(partner_name);
    } else {
        ctx.sdk.start_with_app_guid("");
    }
}

fn shutdown(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.shutdown(args.flag(0));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

fn get_device_id(ctx: &BridgeContext, _args: &Args, reply: Reply) {
    reply.success(ctx.sdk.device_id());
}

fn get_install_attribution(ctx: &BridgeContext, _args: &Args, reply: Reply) {
    reply.json(&ctx.sdk.install_attribution());
}

fn retrieve_install_attribution(ctx: &BridgeContext, _args: &Args, reply: Reply) {
    ctx.sdk
        .retrieve_install_attribution(Box::new(move |attribution: InstallAttribution| {
            reply.json(&attribution);
        }));
}

fn process_deeplink(ctx: &BridgeContext, args: &Args, reply: Reply) {
    ctx.sdk
        .process_deeplink(args.str(0), Box::new(move |deeplink: Deeplink| reply.json(&deeplink)));
}

fn process_deeplink_with_override_timeout(ctx: &BridgeContext, args: &Args, reply: Reply) {
    ctx.sdk.process_deeplink_with_timeout(
        args.str(0),
        args.number(1),
        Box::new(move |deeplink: Deeplink| reply.json(&deeplink)),
    );
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

fn register_push_token(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_push_token(args.str(0));
}

fn set_push_enabled(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.set_push_enabled(args.flag(0));
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

fn register_default_event_string_parameter(ctx: &BridgeContext, args: &Args) {
    ctx.sdk
        .register_default_string_parameter(args.str(0), args.opt_str(1));
}

fn register_default_event_bool_parameter(ctx: &BridgeContext, args: &Args) {
    ctx.sdk
        .register_default_bool_parameter(args.str(0), args.opt_flag(1));
}

fn register_default_event_number_parameter(ctx: &BridgeContext, args: &Args) {
    ctx.sdk
        .register_default_number_parameter(args.str(0), args.opt_number(1));
}

fn register_default_event_user_id(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.register_default_user_id(args.opt_str(0));
}

fn send_event(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.send(args.str(0));
}

fn send_event_with_string(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.send_with_string(args.str(0), args.str(1));
}

fn send_event_with_dictionary(ctx: &BridgeContext, args: &Args) {
    ctx.sdk.send_with_dictionary(args.str(0), &args.object(1));
}

/// Build a full event from `{name, data, androidGooglePlayReceiptData,
/// androidGooglePlayReceiptSignature}`. Missing or mistyped fields take
/// empty defaults.
fn send_event_with_event(ctx: &BridgeContext, args: &Args) {
    let info = args.object(0);
    let event = TrackedEvent::named(field_str(&info, "name"))
        .merge_custom_data(field_object(&info, "data"))
        .with_google_play_receipt(
            field_str(&info, "androidGooglePlayReceiptData"),
            field_str(&info, "androidGooglePlayReceiptSignature"),
        );
    ctx.sdk.send_event(event);
}

fn field_str<'a>(map: &'a Map<String, Value>, key: &str) -> &'a str {
    map.get(key).and_then(Value::as_str).unwrap_or("")
}

fn field_object(map: &Map<String, Value>, key: &str) -> Map<String, Value> {
    map.get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
