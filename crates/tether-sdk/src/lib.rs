// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Tether: tracker SDK abstractions.
//!
//! The router never talks to a global tracker instance. It is handed an
//! `Arc<dyn TrackerSdk>` at construction, so native builds plug in their JNI
//! or Objective-C binding and tests plug in [`recording::RecordingSdk`].

use std::sync::Arc;

pub mod stub;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod recording;

pub use traits::*;

/// Returns the tracker implementation for this build.
///
/// Desktop and CI builds get the in-process [`stub::StubSdk`]. Mobile hosts
/// construct their native binding themselves and pass it to the router.
pub fn platform_sdk() -> Arc<dyn TrackerSdk> {
    Arc::new(stub::StubSdk::new())
}
