//! v2 responses and the v2 error envelope.

use serde_json::Value;

use crate::decode;
use crate::error::{ParseError, ResponseError};
use crate::response::ApiResponse;
use crate::v2::models::{Business, Region};

/// Classifies a v2 `error` object by its `id` member.
///
/// The id table is closed; anything unrecognized (or an error object with no
/// id at all) becomes [`ResponseError::UnknownError`] carrying the raw id.
pub fn classify_error(error: &Value) -> ResponseError {
    let field = || {
        error
            .get("field")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    match error.get("id").and_then(Value::as_str) {
        Some("INTERNAL_ERROR") => ResponseError::InternalError,
        Some("EXCEEDED_REQS") => ResponseError::ExceededRequests,
        Some("MISSING_PARAMETER") => ResponseError::MissingParameter { field: field() },
        Some("INVALID_PARAMETER") => ResponseError::InvalidParameter { field: field() },
        Some("UNAVAILABLE_FOR_LOCATION") => ResponseError::UnavailableForLocation,
        Some("AREA_TOO_LARGE") => ResponseError::AreaTooLarge,
        Some("MULTIPLE_LOCATIONS") => ResponseError::MultipleLocations,
        Some("BUSINESS_UNAVAILABLE") => ResponseError::BusinessUnavailable,
        other => ResponseError::UnknownError {
            code: other.map(str::to_string),
        },
    }
}

fn classify_error_member(payload: &Value) -> Option<ResponseError> {
    payload.get("error").map(classify_error)
}

/// Response of `GET /v2/search/`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    region: Option<Region>,
    total: Option<u64>,
    businesses: Option<Vec<Business>>,
    error: Option<ResponseError>,
}

impl SearchResponse {
    /// Suggested map bounds for the result set.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Total number of results the service matched, which can exceed the
    /// number of businesses returned in this page.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn businesses(&self) -> Option<&[Business]> {
        self.businesses.as_deref()
    }
}

impl ApiResponse for SearchResponse {
    fn from_json(payload: &Value) -> Result<Self, ParseError> {
        if let Some(error) = classify_error_member(payload) {
            return Ok(Self {
                region: None,
                total: None,
                businesses: None,
                error: Some(error),
            });
        }
        Ok(Self {
            region: decode::optional_object(payload, "region", Region::from_json)?,
            total: decode::optional(payload, "total")?,
            businesses: Some(decode::required_array(
                payload,
                "businesses",
                Business::from_json,
            )?),
            error: None,
        })
    }

    fn error(&self) -> Option<&ResponseError> {
        self.error.as_ref()
    }
}

/// Response of `GET /v2/business/{id}`.
///
/// The wire payload is the business object itself; it is surfaced as a
/// one-element list so all v2 responses expose the same access shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessResponse {
    businesses: Option<Vec<Business>>,
    error: Option<ResponseError>,
}

impl BusinessResponse {
    pub fn businesses(&self) -> Option<&[Business]> {
        self.businesses.as_deref()
    }

    pub fn business(&self) -> Option<&Business> {
        self.businesses.as_deref().and_then(<[Business]>::first)
    }
}

impl ApiResponse for BusinessResponse {
    fn from_json(payload: &Value) -> Result<Self, ParseError> {
        if let Some(error) = classify_error_member(payload) {
            return Ok(Self {
                businesses: None,
                error: Some(error),
            });
        }
        Ok(Self {
            businesses: Some(vec![Business::from_json(payload)?]),
            error: None,
        })
    }

    fn error(&self) -> Option<&ResponseError> {
        self.error.as_ref()
    }
}

/// Response of `GET /v2/phone_search/`. Same shape as a search response.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneSearchResponse {
    region: Option<Region>,
    total: Option<u64>,
    businesses: Option<Vec<Business>>,
    error: Option<ResponseError>,
}

impl PhoneSearchResponse {
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn businesses(&self) -> Option<&[Business]> {
        self.businesses.as_deref()
    }
}

impl ApiResponse for PhoneSearchResponse {
    fn from_json(payload: &Value) -> Result<Self, ParseError> {
        if let Some(error) = classify_error_member(payload) {
            return Ok(Self {
                region: None,
                total: None,
                businesses: None,
                error: Some(error),
            });
        }
        Ok(Self {
            region: decode::optional_object(payload, "region", Region::from_json)?,
            total: decode::optional(payload, "total")?,
            businesses: Some(decode::required_array(
                payload,
                "businesses",
                Business::from_json,
            )?),
            error: None,
        })
    }

    fn error(&self) -> Option<&ResponseError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_id_table_is_exhaustive() {
        let table = [
            ("INTERNAL_ERROR", ResponseError::InternalError),
            ("EXCEEDED_REQS", ResponseError::ExceededRequests),
            ("UNAVAILABLE_FOR_LOCATION", ResponseError::UnavailableForLocation),
            ("AREA_TOO_LARGE", ResponseError::AreaTooLarge),
            ("MULTIPLE_LOCATIONS", ResponseError::MultipleLocations),
            ("BUSINESS_UNAVAILABLE", ResponseError::BusinessUnavailable),
        ];
        for (id, expected) in table {
            assert_eq!(classify_error(&json!({"id": id})), expected, "id {id}");
        }
    }

    #[test]
    fn parameter_errors_carry_the_field() {
        assert_eq!(
            classify_error(&json!({"id": "MISSING_PARAMETER", "field": "location"})),
            ResponseError::MissingParameter {
                field: "location".into()
            }
        );
        assert_eq!(
            classify_error(&json!({"id": "INVALID_PARAMETER", "field": "location"})),
            ResponseError::InvalidParameter {
                field: "location".into()
            }
        );
    }

    #[test]
    fn unrecognized_id_becomes_unknown_with_cause() {
        assert_eq!(
            classify_error(&json!({"id": "SOMETHING_NEW"})),
            ResponseError::UnknownError {
                code: Some("SOMETHING_NEW".into())
            }
        );
        assert_eq!(
            classify_error(&json!({})),
            ResponseError::UnknownError { code: None }
        );
    }

    #[test]
    fn error_response_skips_endpoint_decoding() {
        let response =
            SearchResponse::parse(br#"{"error": {"id": "AREA_TOO_LARGE"}}"#).unwrap();
        assert!(!response.was_successful());
        assert_eq!(response.error(), Some(&ResponseError::AreaTooLarge));
        assert!(response.businesses().is_none());
        assert!(response.total().is_none());
        assert!(response.region().is_none());
    }

    #[test]
    fn successful_response_upholds_success_invariant() {
        let payload = json!({
            "total": 1,
            "businesses": [super::super::models::tests::business_payload()]
        });
        let response = SearchResponse::from_json(&payload).unwrap();
        assert!(response.was_successful());
        assert_eq!(response.error(), None);
        assert_eq!(response.total(), Some(1));
        assert_eq!(response.businesses().unwrap().len(), 1);
    }

    #[test]
    fn missing_businesses_fails_with_no_partial_object() {
        let err = SearchResponse::from_json(&json!({"total": 1})).unwrap_err();
        assert_eq!(err, ParseError::missing("businesses"));
    }

    #[test]
    fn non_json_bytes_fail_as_invalid_json() {
        let err = SearchResponse::parse(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
    }

    #[test]
    fn business_response_wraps_single_business() {
        let payload = super::super::models::tests::business_payload();
        let response = BusinessResponse::from_json(&payload).unwrap();
        assert!(response.was_successful());
        assert_eq!(response.business().unwrap().id, "yelp-san-francisco");
        assert_eq!(response.businesses().unwrap().len(), 1);
    }
}
