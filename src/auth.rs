//! Credentials and request signing.
//!
//! Signing is a capability consumed by the dispatcher, not something this
//! crate implements in full: [`RequestSigner`] receives the unsigned transport
//! request and must produce a [`SignedRequest`] or refuse. The crate ships
//! [`BearerSigner`] for the v3 endpoints; an OAuth1 signer for the v2
//! endpoints is injected by the application (tests use a passthrough).

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::params::ParamMap;
use crate::request::Method;
use crate::transport::SignedRequest;

/// API credentials.
///
/// Secrets are wrapped so they stay out of debug output and logs. For v2 all
/// four values are required by the external OAuth1 signer; for v3 only the
/// client id/secret pair (to obtain a token) and then the token itself matter.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: SecretString,
    token: Option<SecretString>,
    token_secret: Option<SecretString>,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::from(consumer_secret.into()),
            token: None,
            token_secret: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.token_secret = Some(SecretString::from(token_secret.into()));
        self
    }

    /// Stores the access token obtained from the v3 token endpoint.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(SecretString::from(token.into()));
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn token_secret(&self) -> Option<&SecretString> {
        self.token_secret.as_ref()
    }
}

/// Why a signer refused to sign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    /// The endpoint needs an access token and none is configured.
    #[error("no access token is configured")]
    MissingToken,
    /// Credentials are incomplete or the request could not be rendered.
    #[error("the request could not be signed: {0}")]
    Failed(String),
}

/// The unsigned request handed to a signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedRequest {
    pub method: Method,
    pub url: String,
    pub params: ParamMap,
}

/// The injectable signing capability.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: UnsignedRequest) -> Result<SignedRequest, SignError>;
}

/// Bearer-token signer for the v3 endpoints.
///
/// Adds `Authorization: Bearer <token>`; refuses with [`SignError::MissingToken`]
/// when no token is configured. The token endpoint itself is exempted: it is
/// the one v3 call that must go out unsigned.
#[derive(Debug, Clone)]
pub struct BearerSigner {
    credentials: Credentials,
}

impl BearerSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl RequestSigner for BearerSigner {
    fn sign(&self, request: UnsignedRequest) -> Result<SignedRequest, SignError> {
        let mut headers = BTreeMap::new();
        if !request.url.contains("/oauth2/token") {
            let token = self.credentials.token().ok_or(SignError::MissingToken)?;
            headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.expose_secret()),
            );
        }
        Ok(SignedRequest {
            method: request.method,
            url: request.url,
            params: request
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
        })
    }
}

/// Signer that forwards the request untouched. Suitable for tests and for
/// transports that handle authentication themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSigner;

impl RequestSigner for NoopSigner {
    fn sign(&self, request: UnsignedRequest) -> Result<SignedRequest, SignError> {
        Ok(SignedRequest {
            method: request.method,
            url: request.url,
            params: request
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: BTreeMap::new(),
        })
    }
}
