// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: connects the command router to the host's stdin/stdout and
// resolves where configuration lives.

pub mod data_dir;
pub mod host;
pub mod settings;
