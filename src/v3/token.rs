//! v3 token grant.
//!
//! `POST /oauth2/token/` exchanges client credentials for the bearer token
//! every other v3 endpoint requires. The grant parameters travel as a form
//! body, not a query string.

use serde_json::Value;

use crate::decode;
use crate::error::{ParseError, ResponseError};
use crate::params::{ParamMap, Parameter, string_parameter};
use crate::request::{ApiRequest, Method};
use crate::response::ApiResponse;
use crate::v3::endpoints;
use crate::v3::response::classify_error_member;

/// The one grant type the token endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    ClientCredentials,
}

impl Parameter for GrantType {
    fn key(&self) -> &'static str {
        "grant_type"
    }

    fn value(&self) -> String {
        "client_credentials".to_string()
    }
}

string_parameter!(
    /// Application client id.
    ClientId,
    "client_id"
);

string_parameter!(
    /// Application client secret.
    ClientSecret,
    "client_secret"
);

/// Parameters of the token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParameters {
    pub grant_type: GrantType,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

impl TokenParameters {
    pub fn client_credentials(
        client_id: impl Into<ClientId>,
        client_secret: impl Into<ClientSecret>,
    ) -> Self {
        Self {
            grant_type: GrantType::ClientCredentials,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// `POST /oauth2/token/`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    parameters: ParamMap,
}

impl TokenRequest {
    pub fn new(token: TokenParameters) -> Self {
        let mut parameters = ParamMap::new();
        parameters.insert(&token.grant_type);
        parameters.insert(&token.client_id);
        parameters.insert(&token.client_secret);
        Self { parameters }
    }
}

impl ApiRequest for TokenRequest {
    type Response = TokenResponse;

    fn path(&self) -> &str {
        endpoints::TOKEN
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn parameters(&self) -> &ParamMap {
        &self.parameters
    }
}

/// The token type the grant can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Bearer,
}

/// Response of the token grant.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<TokenType>,
    expires_in: Option<i64>,
    error: Option<ResponseError>,
}

impl TokenResponse {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }

    /// Seconds until the token expires.
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }
}

impl ApiResponse for TokenResponse {
    fn from_json(payload: &Value) -> Result<Self, ParseError> {
        if let Some(error) = classify_error_member(payload) {
            return Ok(Self {
                access_token: None,
                token_type: None,
                expires_in: None,
                error: Some(error),
            });
        }

        let access_token = decode::required(payload, "access_token")?;
        let raw_token_type: String = decode::required(payload, "token_type")?;
        let token_type = match raw_token_type.as_str() {
            "Bearer" => TokenType::Bearer,
            _ => return Err(ParseError::invalid("token_type", raw_token_type)),
        };
        let expires_in = decode::required(payload, "expires_in")?;

        Ok(Self {
            access_token: Some(access_token),
            token_type: Some(token_type),
            expires_in: Some(expires_in),
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

    #[test]
    fn token_request_builds_form_parameters() {
        let request = TokenRequest::new(TokenParameters::client_credentials("app-id", "app-secret"));
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/oauth2/token/");
        let params = request.parameters();
        assert_eq!(params.get("grant_type"), Some("client_credentials"));
        assert_eq!(params.get("client_id"), Some("app-id"));
        assert_eq!(params.get("client_secret"), Some("app-secret"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn token_response_decodes_grant() {
        let response = TokenResponse::parse(
            br#"{"access_token": "ACCESS", "token_type": "Bearer", "expires_in": 15551999}"#,
        )
        .unwrap();
        assert!(response.was_successful());
        assert_eq!(response.access_token(), Some("ACCESS"));
        assert_eq!(response.token_type(), Some(TokenType::Bearer));
        assert_eq!(response.expires_in(), Some(15551999));
    }

    #[test]
    fn unexpected_token_type_is_invalid() {
        let err = TokenResponse::parse(
            br#"{"access_token": "ACCESS", "token_type": "MAC", "expires_in": 1}"#,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::invalid("token_type", "MAC"));
    }

    #[test]
    fn missing_access_token_is_missing() {
        let err =
            TokenResponse::parse(br#"{"token_type": "Bearer", "expires_in": 1}"#).unwrap_err();
        assert_eq!(err, ParseError::missing("access_token"));
    }

    #[test]
    fn error_grant_skips_field_decoding() {
        let response =
            TokenResponse::parse(br#"{"error": {"code": "VALIDATION_ERROR"}}"#).unwrap();
        assert!(!response.was_successful());
        assert!(response.access_token().is_none());
    }
}
