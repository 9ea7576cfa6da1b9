//! Request schemas for the hotel back office.
//!
//! Each resource describes its request body as a `serde` + `validator`
//! struct. [`validate`] parses and checks a JSON body against such a
//! struct, and [`ValidateSchema`] runs that check as a before-hook so the
//! service only ever sees normalized data.

mod hook;
mod validate;

pub use hook::ValidateSchema;
pub use validate::{normalize, validate};

use std::collections::BTreeMap;

use hotel_core::HotelError;

/// Field messages collected from one validation pass, keyed by field path.
///
/// Keys are kept sorted so the rendered detail is stable.
#[derive(Debug, Default)]
pub struct SchemaErrors {
    map: BTreeMap<String, Vec<String>>,
}

impl SchemaErrors {
    pub fn push_schema(&mut self, msg: impl Into<String>) {
        Self::push_to(&mut self.map, "_schema", msg);
    }

    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        Self::push_to(&mut self.map, field, msg);
    }

    fn push_to(map: &mut BTreeMap<String, Vec<String>>, key: &str, msg: impl Into<String>) {
        map.entry(key.to_string()).or_default().push(msg.into());
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.map.values().flatten().map(String::as_str).collect()
    }

    /// All messages joined with `"; "`.
    pub fn detail(&self) -> String {
        self.messages().join("; ")
    }

    pub fn into_bad_request(self) -> anyhow::Error {
        HotelError::bad_request(self.detail()).into_anyhow()
    }
}

pub fn schema_error(msg: impl Into<String>) -> anyhow::Error {
    let mut errors = SchemaErrors::default();
    errors.push_schema(msg);
    errors.into_bad_request()
}
