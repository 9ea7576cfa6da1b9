use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::{schema_error, SchemaErrors};

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "email" => Some("must be a valid email"),
        "length" => Some("must not be empty"),
        "range" => Some("is out of range"),
        _ => None,
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn push_validation_errors(out: &mut SchemaErrors, prefix: &str, errs: &ValidationErrors) {
    for (field, kind) in errs.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(|m| format!("{key} {m}")))
                        .unwrap_or_else(|| format!("{key} is invalid ({})", e.code));
                    out.push_field(&key, msg);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                push_validation_errors(out, &join_path(prefix, field), nested.as_ref());
            }
            ValidationErrorsKind::List(items) => {
                let base = join_path(prefix, field);
                for (idx, nested) in items {
                    push_validation_errors(out, &format!("{base}[{idx}]"), nested.as_ref());
                }
            }
        }
    }
}

/// Parse `data` into `T` and run its validation rules.
///
/// A body that is not an object, or whose fields have the wrong JSON type,
/// fails with the parser's message; rule violations fail with the field
/// messages. Both are `BadRequest`.
pub fn validate<T>(data: &Value) -> anyhow::Result<T>
where
    T: DeserializeOwned + Validate,
{
    if !data.is_object() {
        return Err(schema_error("request body must be a JSON object"));
    }

    let parsed: T = serde_json::from_value(data.clone()).map_err(|e| schema_error(e.to_string()))?;

    parsed.validate().map_err(|e| {
        let mut out = SchemaErrors::default();
        push_validation_errors(&mut out, "", &e);
        out.into_bad_request()
    })?;

    Ok(parsed)
}

/// [`validate`], then serialize the schema back to JSON. Unknown fields are
/// dropped and optional fields take their defaults.
pub fn normalize<T>(data: &Value) -> anyhow::Result<Value>
where
    T: DeserializeOwned + Validate + Serialize,
{
    let parsed: T = validate(data)?;
    Ok(serde_json::to_value(parsed)?)
}

#[cfg(test)]
mod tests {
    use hotel_core::HotelError;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use validator::Validate;

    use super::{normalize, validate};

    #[derive(Debug, Deserialize, Serialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Suite {
        #[validate(required(message = "name is required"), length(min = 1, message = "name must not be empty"))]
        name: Option<String>,

        #[validate(required(message = "floor is required"))]
        floor: Option<i32>,

        #[serde(default)]
        has_balcony: bool,
    }

    fn detail(err: &anyhow::Error) -> String {
        HotelError::from_anyhow(err).unwrap().detail.clone()
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = validate::<Suite>(&json!({})).unwrap_err();
        assert_eq!(detail(&err), "floor is required; name is required");
    }

    #[test]
    fn empty_strings_are_rejected() {
        let err = validate::<Suite>(&json!({"name": "", "floor": 2})).unwrap_err();
        assert_eq!(detail(&err), "name must not be empty");
    }

    #[test]
    fn wrong_json_type_is_a_bad_request() {
        let err = validate::<Suite>(&json!({"name": "Royal", "floor": "two"})).unwrap_err();
        let hotel = HotelError::from_anyhow(&err).unwrap();
        assert_eq!(hotel.code(), 400);
        assert!(hotel.detail.contains("invalid type"), "{}", hotel.detail);

        let err = validate::<Suite>(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(detail(&err), "request body must be a JSON object");
    }

    #[test]
    fn normalize_fills_defaults_and_drops_unknown_fields() {
        let out = normalize::<Suite>(&json!({"name": "Royal", "floor": 7, "extra": true})).unwrap();
        assert_eq!(out, json!({"name": "Royal", "floor": 7, "hasBalcony": false}));
    }
}
