// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Tether bridge.
//
// The JSON shapes of the SDK payloads match what the native tracker emits, so
// web-view callers see the same objects on every platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tracker SDK log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name case-insensitively. Unknown names map to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "error" => Self::Error,
            "warn" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install attribution as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallAttribution {
    /// Whether attribution has been retrieved from the server yet.
    pub retrieved: bool,
    /// Raw attribution dictionary.
    pub raw: Map<String, Value>,
    /// Whether the install was attributed to a campaign.
    pub attributed: bool,
    /// Whether this is the first install on the device.
    pub first_install: bool,
}

impl Default for InstallAttribution {
    fn default() -> Self {
        Self {
            retrieved: false,
            raw: Map::new(),
            attributed: false,
            first_install: false,
        }
    }
}

/// Result of processing a deep link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deeplink {
    /// Where the app should route. Empty when nothing matched.
    pub destination: String,
    /// Raw deep link payload.
    pub raw: Map<String, Value>,
}

/// Payload pushed when the tracker finishes initialising.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitCompleted {
    pub consent_gdpr_applies: bool,
}

/// Google Play purchase receipt attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GooglePlayReceipt {
    pub data: String,
    pub signature: String,
}

/// A fully described analytics event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEvent {
    pub name: String,
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_play_receipt: Option<GooglePlayReceipt>,
}

impl TrackedEvent {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Merge custom key/value pairs into the event data. Later keys win.
    pub fn merge_custom_data(mut self, data: Map<String, Value>) -> Self {
        self.data.extend(data);
        self
    }

    /// Attach a purchase receipt. Ignored unless both parts are non-blank.
    pub fn with_google_play_receipt(mut self, data: &str, signature: &str) -> Self {
        if !is_blank(data) && !is_blank(signature) {
            self.google_play_receipt = Some(GooglePlayReceipt {
                data: data.to_owned(),
                signature: signature.to_owned(),
            });
        }
        self
    }
}

/// One incoming call: an action name and its positional JSON arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub action: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Outcome of one invocation, as delivered to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvocationResult {
    Success { value: Value },
    Failure { reason: String },
    Unrecognized,
}

impl InvocationResult {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// `true` for empty or whitespace-only strings.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
