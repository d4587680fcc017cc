// Time units for debug timings and latency.
// Timings are stored in microseconds; conversion divides then rounds half away from zero.
use crate::core::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Microsecond,
    Millisecond,
    Second,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Microsecond => "microsecond",
            Unit::Millisecond => "millisecond",
            Unit::Second => "second",
        }
    }

    fn divisor(self) -> f64 {
        match self {
            Unit::Microsecond => 1.0,
            Unit::Millisecond => 1_000.0,
            Unit::Second => 1_000_000.0,
        }
    }

    /// Converts a microsecond value into this unit, rounded to the nearest integer.
    pub fn convert(self, micros: f64) -> i64 {
        (micros / self.divisor()).round() as i64
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "microsecond" => Ok(Unit::Microsecond),
            "millisecond" => Ok(Unit::Millisecond),
            "second" => Ok(Unit::Second),
            _ => Err(Error::unsupported_unit()),
        }
    }
}

/// Anything an accessor accepts as a unit selector.
///
/// Resolution is deferred so accessors can report a missing parse before a bad unit.
pub trait IntoUnit {
    fn into_unit(self) -> Result<Unit, Error>;
}

impl IntoUnit for Unit {
    fn into_unit(self) -> Result<Unit, Error> {
        Ok(self)
    }
}

impl IntoUnit for &str {
    fn into_unit(self) -> Result<Unit, Error> {
        self.parse()
    }
}

impl IntoUnit for &String {
    fn into_unit(self) -> Result<Unit, Error> {
        self.parse()
    }
}

impl IntoUnit for String {
    fn into_unit(self) -> Result<Unit, Error> {
        self.parse()
    }
}
