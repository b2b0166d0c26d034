//! Response contract.
//!
//! Every endpoint response is constructed from a JSON payload and nothing
//! else — there is no default or partially-populated response. Construction
//! first looks for the service's `error` member; when one is present it is
//! classified and the endpoint-specific fields are left absent, and when none
//! is present every required field must decode or the construction fails as a
//! whole with a [`ParseError`].

use serde_json::Value;

use crate::error::{ParseError, ResponseError};

/// A parsed API response.
pub trait ApiResponse: Sized + Send {
    /// Builds the response from a decoded JSON tree.
    fn from_json(payload: &Value) -> Result<Self, ParseError>;

    /// The server-reported error carried by this response, if any.
    fn error(&self) -> Option<&ResponseError>;

    /// Whether the response was received without a server-reported error.
    fn was_successful(&self) -> bool {
        self.error().is_none()
    }

    /// Parses raw response bytes.
    ///
    /// Bytes that are not JSON fail with [`ParseError::InvalidJson`]; a JSON
    /// tree that is not this endpoint's shape fails with the field-level
    /// parse error.
    fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let payload: Value =
            serde_json::from_slice(bytes).map_err(|err| ParseError::InvalidJson {
                cause: err.to_string(),
            })?;
        Self::from_json(&payload)
    }
}
