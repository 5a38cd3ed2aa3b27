// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Positional argument decoders.
//
// A decoder either produces its typed `Arg` or reports a `Mismatch`. What a
// mismatch means (substitute the default, or reject the call) is the router's
// decision, driven by `DecodePolicy`.

use serde_json::{Map, Value};

/// How one positional JSON argument is decoded, with its fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoder {
    /// JSON string, defaulting to the given text.
    Str(&'static str),
    /// JSON string or null, defaulting to `None`.
    OptStr,
    /// JSON boolean, defaulting to the given value.
    Bool(bool),
    /// JSON boolean or null, defaulting to `None`.
    OptBool,
    /// JSON number, defaulting to the given value.
    Number(f64),
    /// JSON number or null, defaulting to `None`.
    OptNumber,
    /// JSON object, defaulting to `{}`.
    Object,
    /// JSON array of strings, defaulting to `[]`. Non-string elements are skipped.
    StringArray,
    /// Position is accepted but never read.
    Ignored,
}

/// A decoded argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    OptStr(Option<String>),
    Bool(bool),
    OptBool(Option<bool>),
    Number(f64),
    OptNumber(Option<f64>),
    Object(Map<String, Value>),
    Strings(Vec<String>),
    Ignored,
}

/// A value did not have the JSON type a decoder expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: &'static str,
    pub got: &'static str,
}

impl Decoder {
    pub fn decode(&self, value: &Value) -> Result<Arg, Mismatch> {
        let arg = match (self, value) {
            (Self::Str(_), Value::String(s)) => Arg::Str(s.clone()),
            (Self::OptStr, Value::String(s)) => Arg::OptStr(Some(s.clone())),
            (Self::OptStr, Value::Null) => Arg::OptStr(None),
            (Self::Bool(_), Value::Bool(b)) => Arg::Bool(*b),
            (Self::OptBool, Value::Bool(b)) => Arg::OptBool(Some(*b)),
            (Self::OptBool, Value::Null) => Arg::OptBool(None),
            (Self::Number(_), Value::Number(n)) => match n.as_f64() {
                Some(n) => Arg::Number(n),
                None => return Err(self.mismatch(value)),
            },
            (Self::OptNumber, Value::Number(n)) => Arg::OptNumber(n.as_f64()),
            (Self::OptNumber, Value::Null) => Arg::OptNumber(None),
            (Self::Object, Value::Object(map)) => Arg::Object(map.clone()),
            (Self::StringArray, Value::Array(items)) => Arg::Strings(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
            ),
            (Self::Ignored, _) => Arg::Ignored,
            _ => return Err(self.mismatch(value)),
        };
        Ok(arg)
    }

    /// The value substituted when decoding fails.
    pub fn default_arg(&self) -> Arg {
        match self {
            Self::Str(default) => Arg::Str((*default).to_owned()),
            Self::OptStr => Arg::OptStr(None),
            Self::Bool(default) => Arg::Bool(*default),
            Self::OptBool => Arg::OptBool(None),
            Self::Number(default) => Arg::Number(*default),
            Self::OptNumber => Arg::OptNumber(None),
            Self::Object => Arg::Object(Map::new()),
            Self::StringArray => Arg::Strings(Vec::new()),
            Self::Ignored => Arg::Ignored,
        }
    }

    pub fn expected(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::OptStr => "string or null",
            Self::Bool(_) => "boolean",
            Self::OptBool => "boolean or null",
            Self::Number(_) => "number",
            Self::OptNumber => "number or null",
            Self::Object => "object",
            Self::StringArray => "array",
            Self::Ignored => "any",
        }
    }

    fn mismatch(&self, value: &Value) -> Mismatch {
        Mismatch {
            expected: self.expected(),
            got: json_type(value),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decoded arguments for one call, read positionally by handlers.
///
/// Accessors fall back to the neutral value when the position holds another
/// variant, so a handler can never panic on its own input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    pub fn new(args: Vec<Arg>) -> Self {
        Self(args)
    }

    pub fn str(&self, index: usize) -> &str {
        match self.0.get(index) {
            Some(Arg::Str(s)) => s,
            Some(Arg::OptStr(Some(s))) => s,
            _ => "",
        }
    }

    pub fn opt_str(&self, index: usize) -> Option<&str> {
        match self.0.get(index) {
            Some(Arg::OptStr(s)) => s.as_deref(),
            Some(Arg::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, index: usize) -> bool {
        match self.0.get(index) {
            Some(Arg::Bool(b)) => *b,
            Some(Arg::OptBool(b)) => b.unwrap_or(false),
            _ => false,
        }
    }

    pub fn opt_flag(&self, index: usize) -> Option<bool> {
        match self.0.get(index) {
            Some(Arg::OptBool(b)) => *b,
            Some(Arg::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn number(&self, index: usize) -> f64 {
        match self.0.get(index) {
            Some(Arg::Number(n)) => *n,
            Some(Arg::OptNumber(n)) => n.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn opt_number(&self, index: usize) -> Option<f64> {
        match self.0.get(index) {
            Some(Arg::OptNumber(n)) => *n,
            Some(Arg::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn object(&self, index: usize) -> Map<String, Value> {
        match self.0.get(index) {
            Some(Arg::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn strings(&self, index: usize) -> &[String] {
        match self.0.get(index) {
            Some(Arg::Strings(items)) => items,
            _ => &[],
        }
    }
}
