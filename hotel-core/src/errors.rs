//! # Errors
//!
//! Two error kinds travel through the service pipeline:
//! - `BadRequest` (400): missing or malformed client input
//! - `GeneralError` (500): anything raised by the data store or below
//!
//! A `HotelError` is carried inside `anyhow::Error` so hooks and services
//! can keep using `?`. Transports decide how to serialize it; with feature
//! `serde` enabled, `to_json()` renders the `{ error, message }` body.

use std::fmt;

use anyhow::Error as AnyError;

pub type HotelResult<T> = std::result::Result<T, AnyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,   // 400
    GeneralError, // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::GeneralError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::GeneralError => "GeneralError",
        }
    }
}

/// A structured error that can live inside `anyhow::Error`.
///
/// `detail` is what went wrong ("ID is required for updating", or the
/// store's own message); the operation summary is added by the transport.
#[derive(Debug)]
pub struct HotelError {
    pub kind: ErrorKind,
    pub detail: String,
    pub source: Option<AnyError>,
}

impl HotelError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `HotelError` anywhere in an `anyhow` chain.
    pub fn from_anyhow(err: &AnyError) -> Option<&HotelError> {
        err.chain().find_map(|e| e.downcast_ref::<HotelError>())
    }

    /// Turn any error into a `HotelError`:
    /// - a top-level `HotelError` is kept as is
    /// - one deeper in the chain (under `.context(..)`) keeps its kind and detail
    /// - anything else becomes a `GeneralError` carrying its display text
    pub fn normalize(err: AnyError) -> HotelError {
        let err = match err.downcast::<HotelError>() {
            Ok(hotel) => return hotel,
            Err(other) => other,
        };

        let found = HotelError::from_anyhow(&err).map(|h| (h.kind, h.detail.clone()));
        match found {
            Some((kind, detail)) => HotelError::new(kind, detail).with_source(err),
            None => HotelError::new(ErrorKind::GeneralError, err.to_string()).with_source(err),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, detail)
    }
}

impl fmt::Display for HotelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.detail)
    }
}

impl std::error::Error for HotelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(feature = "serde")]
impl HotelError {
    /// `{ "error": <detail>, "message": <summary> }`
    pub fn to_json(&self, summary: &str) -> serde_json::Value {
        serde_json::json!({
            "error": self.detail,
            "message": summary,
        })
    }
}

/// Return early with a `HotelError`.
#[macro_export]
macro_rules! bail_hotel {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::HotelError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::HotelError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}
