// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TETHER_CONFIG";

const CONFIG_FILE: &str = "config.json";

/// Return the application data directory. Not created here; the host only
/// reads from it.
pub fn data_dir() -> PathBuf {
    dirs_fallback().join("tether")
}

/// Config file path: `$TETHER_CONFIG` if set, else `<data dir>/config.json`.
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir().join(CONFIG_FILE),
    }
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    PathBuf::from("/tmp")
}
