//! Purpose: The `Jur` envelope: parse, validate, and read a JSON Uniform Response.
//! Exports: `Jur`.
//! Role: Public entry point wrapping the decode boundary and schema checks.
//! Invariants: Stored state is either empty or fully validated; never partial.
//! Invariants: A failed `parse` leaves previously accepted state untouched.
//! Invariants: Timing accessors check parse state before resolving the unit.

use crate::core::clock;
use crate::core::error::Error;
use crate::core::unit::IntoUnit;
use crate::core::validate::{self, Envelope, Request};
use crate::json::parse;
use serde_json::Value;
use std::str::FromStr;

#[derive(Clone, Debug)]
struct Parsed {
    document: Value,
    envelope: Envelope,
}

/// A JSON Uniform Response.
///
/// ```
/// use jur::api::{Jur, Unit};
///
/// let mut response = Jur::new();
/// response.issued().parse(
///     r#"{"message":null,"request":"get","data":[],"debug":{"elapsed":27,"issued_at":1529617930807795,"resolved_at":1529617930807822}}"#,
/// )?;
///
/// assert_eq!(response.message()?, None);
/// assert_eq!(response.elapsed(Unit::Microsecond)?, 27);
/// # Ok::<(), jur::api::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Jur {
    issued_at_client: Option<i64>,
    response: Option<Parsed>,
}

impl Jur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the time the request was sent, from the wall clock.
    pub fn issued(&mut self) -> &mut Self {
        self.issued_with(clock::now_micros())
    }

    /// Stamps an explicit send time, in microseconds since the epoch.
    pub fn issued_with(&mut self, micros: i64) -> &mut Self {
        self.issued_at_client = Some(micros);
        self
    }

    pub fn issued_at_client(&self) -> Option<i64> {
        self.issued_at_client
    }

    pub fn is_parsed(&self) -> bool {
        self.response.is_some()
    }

    /// Decodes and validates `json`, replacing any previously parsed response.
    ///
    /// Fails with `MalformedJson` when the text is not JSON and with
    /// `InvalidEnvelope` when the document breaks the JUR schema.
    pub fn parse(&mut self, json: &str) -> Result<&mut Self, Error> {
        let document = parse::from_str(json)?;
        let envelope = validate::validate_envelope(&document).inspect_err(|err| {
            tracing::debug!(kind = ?err.kind(), error = %err, "rejected JUR response");
        })?;
        tracing::debug!(request = %envelope.request, "accepted JUR response");
        self.response = Some(Parsed { document, envelope });
        Ok(self)
    }

    pub fn message(&self) -> Result<Option<&str>, Error> {
        Ok(self.parsed()?.envelope.message.as_deref())
    }

    pub fn request(&self) -> Result<Request, Error> {
        Ok(self.parsed()?.envelope.request)
    }

    pub fn data(&self) -> Result<&Value, Error> {
        Ok(&self.parsed()?.document["data"])
    }

    /// The whole decoded document, exactly as received.
    pub fn to_object(&self) -> Result<&Value, Error> {
        Ok(&self.parsed()?.document)
    }

    /// Server processing time.
    pub fn elapsed(&self, unit: impl IntoUnit) -> Result<i64, Error> {
        let micros = self.parsed()?.envelope.debug.elapsed;
        Ok(unit.into_unit()?.convert(micros))
    }

    /// When the server controller received the request.
    pub fn issued_at(&self, unit: impl IntoUnit) -> Result<i64, Error> {
        let micros = self.parsed()?.envelope.debug.issued_at;
        Ok(unit.into_unit()?.convert(micros))
    }

    /// When the server controller resolved the request.
    pub fn resolved_at(&self, unit: impl IntoUnit) -> Result<i64, Error> {
        let micros = self.parsed()?.envelope.debug.resolved_at;
        Ok(unit.into_unit()?.convert(micros))
    }

    /// Client send time minus server receive time. Negative when the clocks disagree.
    pub fn latency(&self, unit: impl IntoUnit) -> Result<i64, Error> {
        let parsed = self.parsed()?;
        let issued_at_client = self
            .issued_at_client
            .ok_or_else(Error::issued_time_not_set)?;
        let unit = unit.into_unit()?;
        Ok(unit.convert(issued_at_client as f64 - parsed.envelope.debug.issued_at))
    }

    fn parsed(&self) -> Result<&Parsed, Error> {
        self.response.as_ref().ok_or_else(Error::not_parsed)
    }
}

impl FromStr for Jur {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut jur = Jur::new();
        jur.parse(s)?;
        Ok(jur)
    }
}
