// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host session: one request per input line, answered with acknowledgements,
// replies and notifications.
//
// Every outbound message goes through one unbounded channel. SDK callbacks
// and the notifier push into it from whatever thread they run on, and the
// session's run loop is the only writer to the output stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::Value;
use tether_core::error::Result;
use tether_core::types::InvocationResult;
use tether_router::{CommandRouter, Notifier, Reply};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Notify;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::protocol::{self, Outbound, UNPARSEABLE_ID, WireRequest};

/// Notifier that forwards pushes to the session's outbound channel.
#[derive(Clone)]
pub struct ChannelNotifier {
    outbound: UnboundedSender<Outbound>,
}

impl ChannelNotifier {
    pub fn new(outbound: UnboundedSender<Outbound>) -> Self {
        Self { outbound }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, topic: &str, payload: Value) {
        let message = Outbound::Notify {
            topic: topic.to_owned(),
            payload,
        };
        if self.outbound.send(message).is_err() {
            debug!(topic, "host closed, notification dropped");
        }
    }
}

/// Create the outbound channel shared by the notifier and the session.
pub fn outbound_channel() -> (UnboundedSender<Outbound>, UnboundedReceiver<Outbound>) {
    unbounded_channel()
}

/// How long a closed session waits for outstanding async replies.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Count of replies handed to the router and not yet delivered or dropped.
#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    fn track(self: &Arc<Self>) -> PendingReply {
        self.count.fetch_add(1, Ordering::SeqCst);
        PendingReply(Arc::clone(self))
    }

    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Held by a reply sink. Dropped after the reply is queued, or when the SDK
/// discards the callback without answering.
struct PendingReply(Arc<InFlight>);

impl Drop for PendingReply {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_one();
        }
    }
}

/// One connected web view.
pub struct HostSession {
    router: Arc<CommandRouter>,
    outbound: UnboundedSender<Outbound>,
    in_flight: Arc<InFlight>,
}

impl HostSession {
    pub fn new(router: Arc<CommandRouter>, outbound: UnboundedSender<Outbound>) -> Self {
        Self {
            router,
            outbound,
            in_flight: Arc::default(),
        }
    }

    /// Handle one raw input line as read from the stream. Bytes that are not
    /// UTF-8 are answered like any other unparseable line.
    pub fn handle_raw_line(&self, raw: &[u8]) {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                warn!(error = %e, "request line is not valid UTF-8");
                self.emit(Outbound::Reply {
                    id: UNPARSEABLE_ID,
                    result: InvocationResult::failure(format!(
                        "request line is not valid UTF-8: {e}"
                    )),
                });
            }
        }
    }

    /// Handle one raw input line. Blank lines are skipped.
    pub fn handle_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match protocol::parse_request(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!(error = %e, "malformed request line");
                self.emit(Outbound::Reply {
                    id: UNPARSEABLE_ID,
                    result: InvocationResult::failure(e.to_string()),
                });
            }
        }
    }

    fn handle(&self, request: WireRequest) {
        let id = request.id;
        let handled = match request.args {
            Some(args) => {
                let outbound = self.outbound.clone();
                let pending = self.in_flight.track();
                let reply = Reply::new(move |result| {
                    let _pending = pending;
                    if outbound.send(Outbound::Reply { id, result }).is_err() {
                        debug!(id, "host closed, reply dropped");
                    }
                });
                self.router.dispatch(&request.action, &args, Some(reply))
            }
            None => {
                info!(action = %request.action, "invalid action: no argument list");
                false
            }
        };

        self.emit(Outbound::Ack { id, handled });
        if !handled {
            self.emit(Outbound::Reply {
                id,
                result: InvocationResult::Unrecognized,
            });
        }
    }

    fn emit(&self, message: Outbound) {
        if self.outbound.send(message).is_err() {
            debug!("host closed, message dropped");
        }
    }

    /// Serve until `input` reaches EOF. Replies still outstanding at that
    /// point are awaited for up to [`DRAIN_TIMEOUT`], then the queue is flushed.
    pub async fn run<R, W>(
        &self,
        mut input: R,
        mut output: W,
        mut outbound: UnboundedReceiver<Outbound>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        // Partial reads survive a cancelled `read_until` in `buf`.
        let mut buf = Vec::new();
        loop {
            tokio::select! {
                read = input.read_until(b'\n', &mut buf) => {
                    if read? == 0 && buf.is_empty() {
                        break;
                    }
                    self.handle_raw_line(&buf);
                    buf.clear();
                }
                Some(message) = outbound.recv() => write_message(&mut output, &message).await?,
            }
        }

        let deadline = Instant::now() + DRAIN_TIMEOUT;
        while self.in_flight.count() > 0 {
            tokio::select! {
                Some(message) = outbound.recv() => write_message(&mut output, &message).await?,
                _ = self.in_flight.idle.notified() => {}
                _ = sleep_until(deadline) => {
                    warn!(
                        pending = self.in_flight.count(),
                        "replies still outstanding at shutdown, dropping"
                    );
                    break;
                }
            }
        }

        while let Ok(message) = outbound.try_recv() {
            write_message(&mut output, &message).await?;
        }
        output.flush().await?;
        info!("input closed, host session finished");
        Ok(())
    }
}

async fn write_message<W: AsyncWrite + Unpin>(output: &mut W, message: &Outbound) -> Result<()> {
    let line = protocol::encode(message)?;
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
