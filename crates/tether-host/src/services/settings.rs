// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Loading the bridge configuration for the host.

use std::io::ErrorKind;
use std::path::Path;

use tether_core::BridgeConfig;
use tether_core::error::{Result, TetherError};

/// Load the config at `path`. A missing file is not an error and yields the
/// defaults; anything else unreadable or invalid is.
pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    match BridgeConfig::load(path) {
        Err(TetherError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(BridgeConfig::default()),
        other => other,
    }
}
