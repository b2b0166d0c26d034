//! JSON tree decoding helpers.
//!
//! Response models decode themselves field-by-field from a `serde_json::Value`
//! tree so that every failure names the exact field involved. A missing
//! required field is [`ParseError::Missing`]; a present-but-wrong-shape field
//! is [`ParseError::Invalid`] carrying the raw value. Optional fields that are
//! simply absent decode to `None` without error. Arrays decode element-wise
//! and the first bad element fails the whole decode — there are no partial
//! results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;

/// Decodes a required field, failing with `Missing` when absent (or null) and
/// `Invalid` when present with the wrong shape.
pub fn required<T: DeserializeOwned>(object: &Value, field: &str) -> Result<T, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ParseError::missing(field)),
        Some(raw) => {
            serde_json::from_value(raw.clone()).map_err(|_| invalid_value(field, raw))
        }
    }
}

/// Decodes an optional field; absence (or null) is `None`, the wrong shape is
/// still an error.
pub fn optional<T: DeserializeOwned>(object: &Value, field: &str) -> Result<Option<T>, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => serde_json::from_value(raw.clone())
            .map(Some)
            .map_err(|_| invalid_value(field, raw)),
    }
}

/// Decodes a required array of objects element-wise through `decode_element`.
pub fn required_array<T>(
    object: &Value,
    field: &str,
    decode_element: impl Fn(&Value) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ParseError::missing(field)),
        Some(Value::Array(elements)) => elements.iter().map(decode_element).collect(),
        Some(raw) => Err(invalid_value(field, raw)),
    }
}

/// Decodes an optional array of objects element-wise through `decode_element`.
pub fn optional_array<T>(
    object: &Value,
    field: &str,
    decode_element: impl Fn(&Value) -> Result<T, ParseError>,
) -> Result<Option<Vec<T>>, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(elements)) => {
            elements.iter().map(decode_element).collect::<Result<_, _>>().map(Some)
        }
        Some(raw) => Err(invalid_value(field, raw)),
    }
}

/// Decodes a required sub-object through `decode`.
pub fn required_object<T>(
    object: &Value,
    field: &str,
    decode: impl FnOnce(&Value) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ParseError::missing(field)),
        Some(raw @ Value::Object(_)) => decode(raw),
        Some(raw) => Err(invalid_value(field, raw)),
    }
}

/// Decodes an optional sub-object through `decode`.
pub fn optional_object<T>(
    object: &Value,
    field: &str,
    decode: impl FnOnce(&Value) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(raw @ Value::Object(_)) => decode(raw).map(Some),
        Some(raw) => Err(invalid_value(field, raw)),
    }
}

fn invalid_value(field: &str, raw: &Value) -> ParseError {
    let rendered = match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    ParseError::invalid(field, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_field_missing_names_the_field() {
        let object = json!({"total": 3});
        let err = required::<String>(&object, "name").unwrap_err();
        assert_eq!(err, ParseError::missing("name"));
    }

    #[test]
    fn required_field_wrong_shape_carries_raw_value() {
        let object = json!({"total": "three"});
        let err = required::<u32>(&object, "total").unwrap_err();
        assert_eq!(err, ParseError::invalid("total", "three"));
    }

    #[test]
    fn optional_field_absent_is_none() {
        let object = json!({});
        assert_eq!(optional::<String>(&object, "phone").unwrap(), None);
    }

    #[test]
    fn optional_field_null_is_none() {
        let object = json!({"phone": null});
        assert_eq!(optional::<String>(&object, "phone").unwrap(), None);
    }

    #[test]
    fn optional_field_wrong_shape_still_fails() {
        let object = json!({"phone": 42});
        assert!(optional::<String>(&object, "phone").is_err());
    }

    #[test]
    fn array_decode_fails_on_first_bad_element() {
        let object = json!({"items": [{"n": 1}, {"bad": true}]});
        let result = required_array(&object, "items", |element| required::<i64>(element, "n"));
        assert_eq!(result.unwrap_err(), ParseError::missing("n"));
    }

    #[test]
    fn array_decode_preserves_order() {
        let object = json!({"items": [{"n": 1}, {"n": 2}]});
        let result =
            required_array(&object, "items", |element| required::<i64>(element, "n")).unwrap();
        assert_eq!(result, vec![1, 2]);
    }
}
