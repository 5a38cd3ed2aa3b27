// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TetherError};

/// How argument decoders treat a value of the wrong JSON type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Substitute the decoder's default and carry on.
    #[default]
    Permissive,
    /// Reject the whole call (not handled, no SDK call).
    Strict,
}

/// Persistent bridge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Argument coercion behaviour.
    pub decode_policy: DecodePolicy,
    /// Notifier topic that receives init-completed payloads.
    pub init_completed_topic: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            decode_policy: DecodePolicy::Permissive,
            init_completed_topic: "trackerInitCompleted".into(),
        }
    }
}

impl BridgeConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(TetherError::Config("log_filter is empty".into()));
        }
        if self.init_completed_topic.trim().is_empty() {
            return Err(TetherError::Config("init_completed_topic is empty".into()));
        }
        Ok(())
    }
}
