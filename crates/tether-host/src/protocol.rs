// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-delimited JSON wire format between the host and the web-view side.
//
// Inbound:  {"id": 1, "action": "getDeviceId", "args": []}
// Outbound: {"type": "ack", "id": 1, "handled": true}
//           {"type": "reply", "id": 1, "result": {"status": "success", "value": "KA…"}}
//           {"type": "notify", "topic": "trackerInitCompleted", "payload": {…}}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tether_core::error::Result;
use tether_core::types::InvocationResult;

/// Id used for replies to lines that could not be parsed at all.
pub const UNPARSEABLE_ID: u64 = 0;

/// One call from the web view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireRequest {
    pub id: u64,
    pub action: String,
    /// Absent means no argument list was supplied, which is never handled.
    #[serde(default)]
    pub args: Option<Vec<Value>>,
}

/// One message to the web view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outbound {
    Ack { id: u64, handled: bool },
    Reply { id: u64, result: InvocationResult },
    Notify { topic: String, payload: Value },
}

pub fn parse_request(line: &str) -> Result<WireRequest> {
    Ok(serde_json::from_str(line)?)
}

/// Encode a message as a single line, newline included.
pub fn encode(message: &Outbound) -> Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}
