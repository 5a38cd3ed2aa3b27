// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command router: lookup, arity check, decode, invoke.
//
// Dispatch is synchronous. The descriptor table is read-only once built, so a
// router can be shared across threads behind an `Arc` with no locking. The
// only error signal is the returned `handled` flag.

use std::sync::Arc;

use serde_json::Value;
use tether_core::config::{BridgeConfig, DecodePolicy};
use tether_core::error::Result;
use tether_core::types::{InvocationRequest, is_blank};
use tether_sdk::TrackerSdk;
use tracing::{debug, info, warn};

use crate::commands::standard_table;
use crate::decode::Args;
use crate::descriptor::{CommandDescriptor, CommandTable, Handler};
use crate::reply::{Notifier, Reply};

/// What handlers get to work with.
#[derive(Clone)]
pub struct BridgeContext {
    pub sdk: Arc<dyn TrackerSdk>,
    pub notifier: Arc<dyn Notifier>,
    pub config: BridgeConfig,
}

/// Routes string-named calls to the tracker SDK.
pub struct CommandRouter {
    table: CommandTable,
    ctx: BridgeContext,
}

impl CommandRouter {
    /// Router over the standard command surface.
    pub fn new(
        sdk: Arc<dyn TrackerSdk>,
        notifier: Arc<dyn Notifier>,
        config: BridgeConfig,
    ) -> Result<Self> {
        Ok(Self::with_table(standard_table()?, sdk, notifier, config))
    }

    pub fn with_table(
        table: CommandTable,
        sdk: Arc<dyn TrackerSdk>,
        notifier: Arc<dyn Notifier>,
        config: BridgeConfig,
    ) -> Self {
        info!(
            platform = sdk.platform_name(),
            actions = table.len(),
            policy = ?config.decode_policy,
            "command router ready"
        );
        Self {
            table,
            ctx: BridgeContext {
                sdk,
                notifier,
                config,
            },
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Run `action` with `args`. Returns whether the call was handled.
    ///
    /// Not handled means no SDK call was made: unknown or blank action, wrong
    /// argument count, a result-producing action without `reply`, or (under
    /// the strict policy) a mistyped argument.
    pub fn dispatch(&self, action: &str, args: &[Value], reply: Option<Reply>) -> bool {
        if is_blank(action) {
            info!("invalid action: blank name");
            return false;
        }
        let Some(descriptor) = self.table.get(action) else {
            info!(action, "invalid action");
            return false;
        };
        if args.len() != descriptor.arity() {
            info!(
                action,
                expected = descriptor.arity(),
                got = args.len(),
                "invalid action: wrong argument count"
            );
            return false;
        }
        if descriptor.requires_reply() && reply.is_none() {
            info!(action, "invalid action: no reply channel");
            return false;
        }
        let Some(decoded) = self.decode(descriptor, args) else {
            return false;
        };

        match (descriptor.handler, reply) {
            (Handler::Fire(handler), _) => handler(&self.ctx, &decoded),
            (Handler::Reply(handler), Some(reply)) => handler(&self.ctx, &decoded, reply),
            (Handler::Reply(_), None) => return false,
            (Handler::Unavailable, _) => {
                warn!(action, "{action} API is not available on this platform");
            }
        }
        debug!(action, "dispatched");
        true
    }

    /// Convenience wrapper for a parsed request.
    pub fn dispatch_request(&self, request: &InvocationRequest, reply: Option<Reply>) -> bool {
        self.dispatch(&request.action, &request.args, reply)
    }

    fn decode(&self, descriptor: &CommandDescriptor, args: &[Value]) -> Option<Args> {
        let mut decoded = Vec::with_capacity(args.len());
        for (index, (decoder, value)) in descriptor.decoders.iter().zip(args).enumerate() {
            match decoder.decode(value) {
                Ok(arg) => decoded.push(arg),
                Err(mismatch) => match self.ctx.config.decode_policy {
                    DecodePolicy::Permissive => {
                        debug!(
                            action = descriptor.name,
                            index,
                            expected = mismatch.expected,
                            got = mismatch.got,
                            "argument mismatch, using default"
                        );
                        decoded.push(decoder.default_arg());
                    }
                    DecodePolicy::Strict => {
                        info!(
                            action = descriptor.name,
                            index,
                            expected = mismatch.expected,
                            got = mismatch.got,
                            "invalid action: argument mismatch"
                        );
                        return None;
                    }
                },
            }
        }
        Some(Args::new(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::NullNotifier;
    use serde_json::{Map, json};
    use std::sync::Mutex;
    use tether_core::types::{
        Deeplink, GooglePlayReceipt, InitCompleted, InstallAttribution, InvocationResult,
        LogLevel, TrackedEvent,
    };
    use tether_sdk::recording::{RecordingSdk, SdkCall};

    fn router_over(sdk: &Arc<RecordingSdk>) -> CommandRouter {
        router_with_config(sdk, BridgeConfig::default())
    }

    fn router_with_config(sdk: &Arc<RecordingSdk>, config: BridgeConfig) -> CommandRouter {
        let sdk: Arc<dyn TrackerSdk> = sdk.clone();
        CommandRouter::new(sdk, Arc::new(NullNotifier), config).expect("standard table")
    }

    fn string_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    /// One well-typed call per action, with distinct values in every position
    /// so a swapped or miscoded argument shows up in the recorded call.
    fn standard_calls() -> Vec<(&'static str, Vec<Value>, Option<SdkCall>)> {
        let name = |s: &str| s.to_owned();
        vec![
            ("executeAdvancedInstruction", vec![json!("wrapper"), json!("{\"v\":1}")],
                Some(SdkCall::ExecuteAdvancedInstruction { name: name("wrapper"), value: name("{\"v\":1}") })),
            ("setLogLevel", vec![json!("trace")], Some(SdkCall::SetLogLevel(LogLevel::Trace))),
            ("setSleep", vec![json!(true)], Some(SdkCall::SetSleep(true))),
            ("setAppLimitAdTracking", vec![json!(true)], Some(SdkCall::SetAppLimitAdTracking(true))),
            ("registerCustomDeviceIdentifier", vec![json!("idfa"), json!("abc")],
                Some(SdkCall::RegisterCustomDeviceIdentifier { name: name("idfa"), value: Some(name("abc")) })),
            ("registerCustomStringValue", vec![json!("tier"), json!("gold")],
                Some(SdkCall::RegisterCustomStringValue { name: name("tier"), value: Some(name("gold")) })),
            ("registerCustomBoolValue", vec![json!("vip"), json!(true)],
                Some(SdkCall::RegisterCustomBoolValue { name: name("vip"), value: Some(true) })),
            ("registerCustomNumberValue", vec![json!("age"), json!(42.5)],
                Some(SdkCall::RegisterCustomNumberValue { name: name("age"), value: Some(42.5) })),
            ("registerIdentityLink", vec![json!("login"), json!("user-7")],
                Some(SdkCall::RegisterIdentityLink { name: name("login"), value: name("user-7") })),
            ("enableAndroidInstantApps", vec![json!("instant-guid")],
                Some(SdkCall::EnableInstantApps(name("instant-guid")))),
            ("enableIosAppClips", vec![json!("clip-guid")], None),
            ("enableIosAtt", vec![json!(true)], None),
            ("setIosAttAuthorizationWaitTime", vec![json!(30)], None),
            ("setIosAttAuthorizationAutoRequest", vec![json!(false)], None),
            ("registerPrivacyProfile", vec![json!("gdpr"), json!(["email", "phone"])],
                Some(SdkCall::RegisterPrivacyProfile { name: name("gdpr"), keys: vec![name("email"), name("phone")] })),
            ("setPrivacyProfileEnabled", vec![json!("gdpr"), json!(true)],
                Some(SdkCall::SetPrivacyProfileEnabled { name: name("gdpr"), enabled: true })),
            ("setInitCompletedListener", vec![json!(false)],
                Some(SdkCall::SetInitCompletedListener { installed: false })),
            ("setIntelligentConsentGranted", vec![json!(true)],
                Some(SdkCall::SetIntelligentConsentGranted(true))),
            ("getStarted", vec![], Some(SdkCall::IsStarted)),
            ("start", vec![json!("app-guid"), json!("ios-guid"), json!("partner")],
                Some(SdkCall::StartWithAppGuid(name("app-guid")))),
            ("shutdown", vec![json!(true)], Some(SdkCall::Shutdown { delete_data: true })),
            ("getDeviceId", vec![], Some(SdkCall::DeviceId)),
            ("getInstallAttribution", vec![], Some(SdkCall::InstallAttribution)),
            ("retrieveInstallAttribution", vec![], Some(SdkCall::RetrieveInstallAttribution)),
            ("processDeeplink", vec![json!("app://a")],
                Some(SdkCall::ProcessDeeplink { path: name("app://a"), timeout_secs: None })),
            ("processDeeplinkWithOverrideTimeout", vec![json!("app://b"), json!(2.5)],
                Some(SdkCall::ProcessDeeplink { path: name("app://b"), timeout_secs: Some(2.5) })),
            ("registerPushToken", vec![json!("token-1")], Some(SdkCall::RegisterPushToken(name("token-1")))),
            ("setPushEnabled", vec![json!(true)], Some(SdkCall::SetPushEnabled(true))),
            ("registerDefaultEventStringParameter", vec![json!("channel"), json!("web")],
                Some(SdkCall::RegisterDefaultStringParameter { name: name("channel"), value: Some(name("web")) })),
            ("registerDefaultEventBoolParameter", vec![json!("beta"), json!(true)],
                Some(SdkCall::RegisterDefaultBoolParameter { name: name("beta"), value: Some(true) })),
            ("registerDefaultEventNumberParameter", vec![json!("build"), json!(7)],
                Some(SdkCall::RegisterDefaultNumberParameter { name: name("build"), value: Some(7.0) })),
            ("registerDefaultEventUserId", vec![json!("user-9")],
                Some(SdkCall::RegisterDefaultUserId(Some(name("user-9"))))),
            ("sendEvent", vec![json!("tap")], Some(SdkCall::Send(name("tap")))),
            ("sendEventWithString", vec![json!("search"), json!("shoes")],
                Some(SdkCall::SendWithString { name: name("search"), data: name("shoes") })),
            ("sendEventWithDictionary", vec![json!("level"), json!({"score": 3})],
                Some(SdkCall::SendWithDictionary { name: name("level"), data: string_map(json!({"score": 3})) })),
            ("sendEventWithEvent", vec![json!({"name": "buy", "data": {"sku": "x"}})],
                Some(SdkCall::SendEvent(
                    TrackedEvent::named("buy").merge_custom_data(string_map(json!({"sku": "x"}))),
                ))),
        ]
    }

    #[test]
    fn every_action_makes_one_sdk_call_with_decoded_values() {
        let reference = Arc::new(RecordingSdk::new());
        let mut covered: Vec<&str> = standard_calls().iter().map(|(action, _, _)| *action).collect();
        covered.sort_unstable();
        assert_eq!(covered, router_over(&reference).table().names());

        for (action, args, expected) in standard_calls() {
            let sdk = Arc::new(RecordingSdk::new());
            let router = router_over(&sdk);
            let (reply, _rx) = Reply::channel();

            assert!(router.dispatch(action, &args, Some(reply)), "{action} not handled");
            assert_eq!(sdk.calls(), expected.into_iter().collect::<Vec<_>>(), "{action}");
        }
    }

    #[test]
    fn wrong_arity_is_unhandled_and_silent() {
        let reference = Arc::new(RecordingSdk::new());
        let names = router_over(&reference).table().names();

        for name in names {
            let sdk = Arc::new(RecordingSdk::new());
            let router = router_over(&sdk);
            let arity = router.table().get(name).expect("registered").arity();

            let too_many = vec![Value::Null; arity + 1];
            let (reply, _rx) = Reply::channel();
            assert!(!router.dispatch(name, &too_many, Some(reply)), "{name}");
            if arity > 0 {
                let too_few = vec![Value::Null; arity - 1];
                let (reply, _rx) = Reply::channel();
                assert!(!router.dispatch(name, &too_few, Some(reply)), "{name}");
            }
            assert_eq!(sdk.call_count(), 0, "{name}");
        }
    }

    #[test]
    fn unknown_action_is_never_handled() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        for count in 0..4 {
            let args = vec![json!("x"); count];
            let (reply, _rx) = Reply::channel();
            assert!(!router.dispatch("doSomethingUnknown", &args, Some(reply)));
        }
        assert!(!router.dispatch("", &[], None));
        assert!(!router.dispatch("   ", &[], None));
        assert_eq!(sdk.call_count(), 0);
    }

    #[test]
    fn get_started_replies_synchronously() {
        let sdk = Arc::new(RecordingSdk::new().with_started(true));
        let router = router_over(&sdk);
        let (reply, mut rx) = Reply::channel();
        assert!(router.dispatch("getStarted", &[], Some(reply)));
        // Delivered before dispatch returned.
        assert_eq!(rx.try_recv().expect("sync"), InvocationResult::success("true"));

        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        let (reply, mut rx) = Reply::channel();
        assert!(router.dispatch("getStarted", &[], Some(reply)));
        assert_eq!(rx.try_recv().expect("sync"), InvocationResult::success("false"));
    }

    #[test]
    fn result_producing_actions_need_a_reply() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(!router.dispatch("getStarted", &[], None));
        assert!(!router.dispatch("getDeviceId", &[], None));
        assert!(!router.dispatch("processDeeplink", &[json!("/p")], None));
        assert_eq!(sdk.call_count(), 0);
    }

    #[test]
    fn start_prefers_app_guid() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("start", &[json!("guid123"), json!("iosguid"), json!("partner")], None));
        assert_eq!(sdk.calls(), vec![SdkCall::StartWithAppGuid("guid123".into())]);
    }

    #[test]
    fn start_falls_back_to_partner_name() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("start", &[json!(""), json!(""), json!("partnerX")], None));
        assert_eq!(sdk.calls(), vec![SdkCall::StartWithPartnerName("partnerX".into())]);
    }

    #[test]
    fn start_with_nothing_uses_empty_app_guid() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("start", &[json!(""), json!(""), json!("  ")], None));
        assert_eq!(sdk.calls(), vec![SdkCall::StartWithAppGuid(String::new())]);
    }

    #[test]
    fn deeplink_timeout_passes_through() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        let (reply, _rx) = Reply::channel();
        assert!(router.dispatch(
            "processDeeplinkWithOverrideTimeout",
            &[json!("/path"), json!(5.0)],
            Some(reply)
        ));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::ProcessDeeplink {
                path: "/path".into(),
                timeout_secs: Some(5.0)
            }]
        );
    }

    #[test]
    fn miscoded_deeplink_timeout_falls_back_to_ten_seconds() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        for bad in [json!("soon"), Value::Null, json!({})] {
            let (reply, _rx) = Reply::channel();
            assert!(router.dispatch(
                "processDeeplinkWithOverrideTimeout",
                &[json!("/path"), bad],
                Some(reply)
            ));
        }
        assert!(sdk.calls().iter().all(|call| matches!(
            call,
            SdkCall::ProcessDeeplink { timeout_secs: Some(t), .. } if *t == 10.0
        )));
        assert_eq!(sdk.call_count(), 3);
    }

    #[test]
    fn deeplink_result_arrives_from_sdk_thread() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        let (reply, rx) = Reply::channel();
        assert!(router.dispatch("processDeeplink", &[json!("app://promo")], Some(reply)));

        let completer = Arc::clone(&sdk);
        std::thread::spawn(move || {
            completer.complete_deeplinks(Deeplink {
                destination: "app://promo/landing".into(),
                raw: Map::new(),
            })
        })
        .join()
        .expect("join");

        assert_eq!(
            rx.blocking_recv().expect("delivered"),
            InvocationResult::success(json!({"destination": "app://promo/landing", "raw": {}}))
        );
    }

    #[test]
    fn attribution_is_serialized_for_both_shapes() {
        let attribution = InstallAttribution {
            retrieved: true,
            attributed: true,
            ..Default::default()
        };
        let expected = json!({
            "retrieved": true, "raw": {}, "attributed": true, "firstInstall": false
        });
        let sdk = Arc::new(RecordingSdk::new().with_attribution(attribution.clone()));
        let router = router_over(&sdk);

        let (reply, mut rx) = Reply::channel();
        assert!(router.dispatch("getInstallAttribution", &[], Some(reply)));
        assert_eq!(
            rx.try_recv().expect("sync"),
            InvocationResult::success(expected.clone())
        );

        let (reply, mut rx) = Reply::channel();
        assert!(router.dispatch("retrieveInstallAttribution", &[], Some(reply)));
        assert!(rx.try_recv().is_err(), "not delivered until the SDK calls back");
        assert_eq!(sdk.complete_attribution(attribution), 1);
        assert_eq!(rx.blocking_recv().expect("async"), InvocationResult::success(expected));
    }

    #[test]
    fn device_id_is_a_plain_string() {
        let sdk = Arc::new(RecordingSdk::new().with_device_id("KA0123"));
        let router = router_over(&sdk);
        let (reply, mut rx) = Reply::channel();
        assert!(router.dispatch("getDeviceId", &[], Some(reply)));
        assert_eq!(rx.try_recv().expect("sync"), InvocationResult::success("KA0123"));
    }

    #[test]
    fn non_bool_custom_value_becomes_none() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("registerCustomBoolValue", &[json!("flag"), json!("yes")], None));
        assert!(router.dispatch("registerCustomBoolValue", &[json!("flag"), json!(false)], None));
        assert_eq!(
            sdk.calls(),
            vec![
                SdkCall::RegisterCustomBoolValue {
                    name: "flag".into(),
                    value: None
                },
                SdkCall::RegisterCustomBoolValue {
                    name: "flag".into(),
                    value: Some(false)
                },
            ]
        );
    }

    #[test]
    fn strict_policy_rejects_mistyped_arguments() {
        let sdk = Arc::new(RecordingSdk::new());
        let config = BridgeConfig {
            decode_policy: DecodePolicy::Strict,
            ..Default::default()
        };
        let router = router_with_config(&sdk, config);
        assert!(!router.dispatch("registerCustomBoolValue", &[json!("flag"), json!("yes")], None));
        assert!(!router.dispatch("setSleep", &[json!(1)], None));
        // null is a legal value for optional positions
        assert!(router.dispatch("registerCustomBoolValue", &[json!("flag"), Value::Null], None));
        assert_eq!(sdk.call_count(), 1);
    }

    #[test]
    fn unavailable_actions_are_accepted_without_sdk_calls() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        for name in [
            "enableIosAppClips",
            "enableIosAtt",
            "setIosAttAuthorizationWaitTime",
            "setIosAttAuthorizationAutoRequest",
        ] {
            assert!(router.dispatch(name, &[json!(1)], None), "{name}");
        }
        assert_eq!(sdk.call_count(), 0);
    }

    #[test]
    fn log_level_is_parsed() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("setLogLevel", &[json!("debug")], None));
        assert!(router.dispatch("setLogLevel", &[json!(3)], None));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SetLogLevel(LogLevel::Debug), SdkCall::SetLogLevel(LogLevel::Info)]
        );
    }

    #[test]
    fn privacy_profile_keys_are_strings() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch(
            "registerPrivacyProfile",
            &[json!("gdpr"), json!(["email", 7, "phone"])],
            None
        ));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::RegisterPrivacyProfile {
                name: "gdpr".into(),
                keys: vec!["email".into(), "phone".into()]
            }]
        );
    }

    #[test]
    fn send_event_with_event_builds_full_event() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        let info = json!({
            "name": "purchase",
            "data": {"price": 9.99},
            "androidGooglePlayReceiptData": "receipt",
            "androidGooglePlayReceiptSignature": "signature"
        });
        assert!(router.dispatch("sendEventWithEvent", &[info], None));

        let mut data = Map::new();
        data.insert("price".into(), json!(9.99));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SendEvent(TrackedEvent {
                name: "purchase".into(),
                data,
                google_play_receipt: Some(GooglePlayReceipt {
                    data: "receipt".into(),
                    signature: "signature".into()
                }),
            })]
        );
    }

    #[test]
    fn send_event_with_event_tolerates_missing_fields() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("sendEventWithEvent", &[json!({"androidGooglePlayReceiptData": "r"})], None));
        assert!(router.dispatch("sendEventWithEvent", &[json!("not an object")], None));
        assert_eq!(
            sdk.calls(),
            vec![
                SdkCall::SendEvent(TrackedEvent::named("")),
                SdkCall::SendEvent(TrackedEvent::named("")),
            ]
        );
    }

    #[test]
    fn repeated_events_are_not_deduplicated() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        for _ in 0..3 {
            assert!(router.dispatch("sendEvent", &[json!("tap")], None));
        }
        assert_eq!(sdk.calls(), vec![SdkCall::Send("tap".into()); 3]);
    }

    #[test]
    fn init_listener_pushes_to_configured_topic() {
        let sdk = Arc::new(RecordingSdk::new());
        let pushed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pushed);
        let notifier = move |topic: &str, payload: Value| {
            if let Ok(mut pushed) = sink.lock() {
                pushed.push((topic.to_owned(), payload));
            }
        };
        let config = BridgeConfig {
            init_completed_topic: "initDone".into(),
            ..Default::default()
        };
        let dyn_sdk: Arc<dyn TrackerSdk> = sdk.clone();
        let router = CommandRouter::new(dyn_sdk, Arc::new(notifier), config).expect("router");

        assert!(router.dispatch("setInitCompletedListener", &[json!(true)], None));
        assert!(sdk.fire_init_completed(InitCompleted {
            consent_gdpr_applies: true
        }));
        assert!(sdk.fire_init_completed(InitCompleted::default()));

        assert!(router.dispatch("setInitCompletedListener", &[json!(false)], None));
        assert!(!sdk.fire_init_completed(InitCompleted::default()));

        let pushed = pushed.lock().expect("lock").clone();
        assert_eq!(
            pushed,
            vec![
                ("initDone".to_owned(), json!({"consentGdprApplies": true})),
                ("initDone".to_owned(), json!({"consentGdprApplies": false})),
            ]
        );
        assert_eq!(
            sdk.calls(),
            vec![
                SdkCall::SetInitCompletedListener { installed: true },
                SdkCall::SetInitCompletedListener { installed: false },
            ]
        );
    }

    #[test]
    fn init_listener_flag_defaults_to_install() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        assert!(router.dispatch("setInitCompletedListener", &[json!("yes")], None));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SetInitCompletedListener { installed: true }]
        );
    }

    #[test]
    fn dispatch_request_uses_action_and_args() {
        let sdk = Arc::new(RecordingSdk::new());
        let router = router_over(&sdk);
        let request = InvocationRequest {
            action: "registerPushToken".into(),
            args: vec![json!("token")],
        };
        assert!(router.dispatch_request(&request, None));
        assert_eq!(sdk.calls(), vec![SdkCall::RegisterPushToken("token".into())]);
    }

    #[test]
    fn router_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommandRouter>();
        fn assert_send<T: Send>() {}
        assert_send::<Reply>();
    }
}
