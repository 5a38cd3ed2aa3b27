// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command descriptors and the read-only table they live in.

use std::collections::HashMap;

use tether_core::error::{Result, TetherError};
use tether_core::types::is_blank;

use crate::decode::{Args, Decoder};
use crate::reply::Reply;
use crate::router::BridgeContext;

/// Calls the SDK and returns; nothing crosses back.
pub type FireHandler = fn(&BridgeContext, &Args);

/// Calls the SDK and completes the reply, now or from an SDK continuation.
pub type ReplyHandler = fn(&BridgeContext, &Args, Reply);

/// What running a command does.
#[derive(Clone, Copy)]
pub enum Handler {
    Fire(FireHandler),
    Reply(ReplyHandler),
    /// Accepted for call-site compatibility but not supported on this
    /// platform: logs a warning, makes no SDK call.
    Unavailable,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fire(_) => "Fire",
            Self::Reply(_) => "Reply",
            Self::Unavailable => "Unavailable",
        })
    }
}

/// A registered action. The arity is the number of decoders, so the two
/// can never disagree.
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub decoders: &'static [Decoder],
    pub handler: Handler,
}

impl CommandDescriptor {
    pub const fn fire(name: &'static str, decoders: &'static [Decoder], handler: FireHandler) -> Self {
        Self {
            name,
            decoders,
            handler: Handler::Fire(handler),
        }
    }

    pub const fn reply(
        name: &'static str,
        decoders: &'static [Decoder],
        handler: ReplyHandler,
    ) -> Self {
        Self {
            name,
            decoders,
            handler: Handler::Reply(handler),
        }
    }

    pub const fn unavailable(name: &'static str, decoders: &'static [Decoder]) -> Self {
        Self {
            name,
            decoders,
            handler: Handler::Unavailable,
        }
    }

    pub const fn arity(&self) -> usize {
        self.decoders.len()
    }

    pub const fn requires_reply(&self) -> bool {
        matches!(self.handler, Handler::Reply(_))
    }
}

/// Descriptors keyed by action name.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandDescriptor>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Names must be non-blank and unique.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        if is_blank(descriptor.name) {
            return Err(TetherError::EmptyActionName);
        }
        if self.commands.contains_key(descriptor.name) {
            return Err(TetherError::DuplicateAction(descriptor.name.to_owned()));
        }
        self.commands.insert(descriptor.name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    /// Action names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
