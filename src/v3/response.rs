//! v3 search response and the v3 error envelope.

use serde_json::Value;

use crate::decode;
use crate::error::{ParseError, ResponseError};
use crate::response::ApiResponse;
use crate::v2::Region;
use crate::v3::models::Business;

/// Classifies a v3 `error` object by its `code` member.
pub fn classify_error(error: &Value) -> ResponseError {
    match error.get("code").and_then(Value::as_str) {
        Some("NOT_FOUND") => ResponseError::NotFound,
        Some("TOKEN_MISSING") => ResponseError::TokenMissing,
        other => ResponseError::UnknownError {
            code: other.map(str::to_string),
        },
    }
}

pub(crate) fn classify_error_member(payload: &Value) -> Option<ResponseError> {
    payload.get("error").map(classify_error)
}

/// Response of `GET /v3/businesses/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    total: Option<u64>,
    businesses: Option<Vec<Business>>,
    region: Option<Region>,
    error: Option<ResponseError>,
}

impl SearchResponse {
    /// Total number of results the service matched.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn businesses(&self) -> Option<&[Business]> {
        self.businesses.as_deref()
    }

    /// Suggested map bounds for the result set.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }
}

impl ApiResponse for SearchResponse {
    fn from_json(payload: &Value) -> Result<Self, ParseError> {
        if let Some(error) = classify_error_member(payload) {
            return Ok(Self {
                total: None,
                businesses: None,
                region: None,
                error: Some(error),
            });
        }
        Ok(Self {
            total: Some(decode::required(payload, "total")?),
            businesses: Some(decode::required_array(
                payload,
                "businesses",
                Business::from_json,
            )?),
            region: Some(decode::required_object(payload, "region", Region::from_json)?),
            error: None,
        })
    }

    fn error(&self) -> Option<&ResponseError> {
        self.error.as_ref()
    }
}
