// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tether Router: turns string-named calls with JSON arguments into typed
// calls on the injected tracker SDK. Descriptors live in a read-only table
// keyed by action name; each one carries its decoders (and so its arity) and
// the handler that forwards to the SDK.

pub mod commands;
pub mod decode;
pub mod descriptor;
pub mod reply;
pub mod router;

pub use decode::{Arg, Args, Decoder};
pub use descriptor::{CommandDescriptor, CommandTable, Handler};
pub use reply::{Notifier, NullNotifier, Reply};
pub use router::{BridgeContext, CommandRouter};
