// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reply channels and the notification push path.
//
// A `Reply` may be completed on any thread, including SDK worker threads long
// after `dispatch` returned. Sending consumes it, so a result is delivered at
// most once.

use serde::Serialize;
use serde_json::Value;
use tether_core::types::InvocationResult;
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Sink = Box<dyn FnOnce(InvocationResult) + Send + 'static>;

/// One-shot delivery of an `InvocationResult` to the caller.
pub struct Reply {
    sink: Sink,
}

impl Reply {
    pub fn new(sink: impl FnOnce(InvocationResult) + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// A reply paired with a single-shot receiver the caller can await.
    pub fn channel() -> (Self, oneshot::Receiver<InvocationResult>) {
        let (tx, rx) = oneshot::channel();
        let reply = Self::new(move |result| {
            if tx.send(result).is_err() {
                debug!("reply receiver dropped before delivery");
            }
        });
        (reply, rx)
    }

    pub fn send(self, result: InvocationResult) {
        (self.sink)(result);
    }

    pub fn success(self, value: impl Into<Value>) {
        self.send(InvocationResult::success(value));
    }

    /// Serialize `payload` and deliver it, or deliver a failure if it won't
    /// serialize.
    pub fn json<T: Serialize>(self, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.success(value),
            Err(e) => {
                warn!(error = %e, "reply payload failed to serialize");
                self.send(InvocationResult::failure(e.to_string()));
            }
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply").finish_non_exhaustive()
    }
}

/// Push path for persistent listeners that outlive any single invocation.
pub trait Notifier: Send + Sync {
    fn notify(&self, topic: &str, payload: Value);
}

impl<F> Notifier for F
where
    F: Fn(&str, Value) + Send + Sync,
{
    fn notify(&self, topic: &str, payload: Value) {
        self(topic, payload);
    }
}

/// Discards notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, topic: &str, _payload: Value) {
        debug!(topic, "notification discarded");
    }
}
