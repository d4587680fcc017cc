use crate::core::validate::Violation;
use std::error::Error as StdError;
use std::fmt;

pub const ERR_RESPONSE_NOT_PARSED_YET: &str =
    "Unable to access the property of the response before without parsing it.";
pub const ERR_UNIT_NOT_SUPPORTED: &str = "this unit is not supported.";
pub const ERR_ISSUED_TIME_NOT_SET: &str = "The issued time should be initialized first.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    MalformedJson,
    InvalidEnvelope,
    NotParsed,
    UnsupportedUnit,
    IssuedTimeNotSet,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    violation: Option<Violation>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            violation: None,
            source: None,
        }
    }

    pub(crate) fn not_parsed() -> Self {
        Self::new(ErrorKind::NotParsed).with_message(ERR_RESPONSE_NOT_PARSED_YET)
    }

    pub(crate) fn unsupported_unit() -> Self {
        Self::new(ErrorKind::UnsupportedUnit).with_message(ERR_UNIT_NOT_SUPPORTED)
    }

    pub(crate) fn issued_time_not_set() -> Self {
        Self::new(ErrorKind::IssuedTimeNotSet).with_message(ERR_ISSUED_TIME_NOT_SET)
    }

    pub(crate) fn invalid_envelope(violation: Violation) -> Self {
        Self::new(ErrorKind::InvalidEnvelope).with_violation(violation)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The failed schema check, for `InvalidEnvelope` errors.
    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attaches the violation and renders its text as the error message.
    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.message = Some(violation.to_string());
        self.violation = Some(violation);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::MalformedJson => 3,
        ErrorKind::InvalidEnvelope => 4,
        ErrorKind::NotParsed => 5,
        ErrorKind::UnsupportedUnit => 6,
        ErrorKind::IssuedTimeNotSet => 7,
        ErrorKind::Io => 8,
    }
}
