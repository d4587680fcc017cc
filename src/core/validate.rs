// JUR schema checks over a decoded JSON document.
// Checks run in a fixed order and stop at the first failure, so the
// reported violation is deterministic for a given input.
use crate::core::error::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

pub const REQUIRED_ATTRIBUTES: [&str; 4] = ["message", "data", "request", "debug"];
pub const DEBUG_ATTRIBUTES: [&str; 3] = ["elapsed", "issued_at", "resolved_at"];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Request {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Request {
    pub const ALL: [Request; 5] = [
        Request::Get,
        Request::Post,
        Request::Put,
        Request::Patch,
        Request::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Request::Get => "get",
            Request::Post => "post",
            Request::Put => "put",
            Request::Patch => "patch",
            Request::Delete => "delete",
        }
    }

    /// Exact, case-sensitive match against the five JUR verbs.
    pub fn from_verb(verb: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|request| request.as_str() == verb)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side timings from the `debug` block, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugTimings {
    pub elapsed: f64,
    pub issued_at: f64,
    pub resolved_at: f64,
}

/// Typed view of a document that passed every schema check.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub message: Option<String>,
    pub request: Request,
    pub debug: DebugTimings,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    MissingAttribute(&'static str),
    MissingDebugAttribute(&'static str),
    MessageNotStringOrNull,
    RequestNotAllowed,
    DebugNotNumber(&'static str),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("The response is not a valid JUR (")?;
        match self {
            Violation::MissingAttribute(key) => {
                write!(f, "the attribute \"{key}\" is missing from the response")?
            }
            Violation::MissingDebugAttribute(key) => {
                write!(f, "the attribute \"{key}\" is missing from the attribute \"debug\"")?
            }
            Violation::MessageNotStringOrNull => {
                f.write_str("the attribute \"message\" must be either a string or null")?
            }
            // Names "debug" rather than "request"; existing clients match on this text.
            Violation::RequestNotAllowed => {
                let verbs: Vec<&str> = Request::ALL.iter().map(|r| r.as_str()).collect();
                write!(
                    f,
                    "the attribute \"debug\" must have one of the following value: {}",
                    verbs.join(", ")
                )?
            }
            Violation::DebugNotNumber(key) => write!(
                f,
                "the attribute \"{key}\" of the attribute \"debug\" must be a number"
            )?,
        }
        f.write_str(").")
    }
}

pub fn validate_envelope(document: &Value) -> Result<Envelope, Error> {
    check_envelope(document).map_err(Error::invalid_envelope)
}

fn check_envelope(document: &Value) -> Result<Envelope, Violation> {
    let empty = Map::new();
    // Non-object documents have no attributes at all.
    let root = document.as_object().unwrap_or(&empty);

    for key in REQUIRED_ATTRIBUTES {
        if !root.contains_key(key) {
            return Err(Violation::MissingAttribute(key));
        }
    }

    let debug = root
        .get("debug")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    for key in DEBUG_ATTRIBUTES {
        if !debug.contains_key(key) {
            return Err(Violation::MissingDebugAttribute(key));
        }
    }

    let message = match &root["message"] {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        _ => return Err(Violation::MessageNotStringOrNull),
    };

    let request = root["request"]
        .as_str()
        .and_then(Request::from_verb)
        .ok_or(Violation::RequestNotAllowed)?;

    let number = |key: &'static str| -> Result<f64, Violation> {
        match &debug[key] {
            Value::Number(number) => number.as_f64().ok_or(Violation::DebugNotNumber(key)),
            _ => Err(Violation::DebugNotNumber(key)),
        }
    };

    Ok(Envelope {
        message,
        request,
        debug: DebugTimings {
            elapsed: number("elapsed")?,
            issued_at: number("issued_at")?,
            resolved_at: number("resolved_at")?,
        },
    })
}
