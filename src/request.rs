//! Request dispatch.
//!
//! Every endpoint is a type implementing [`ApiRequest`], which statically
//! declares its response type; [`Client::send`] is the single dispatch path.
//! Per send the outcome classification is fixed: validation failure, signing
//! failure, transport failure, empty body, parse failure, or a parsed
//! response — and a parsed response may still carry a server-reported error,
//! which callers inspect on the response itself.
//!
//! Dispatch holds no shared state and builds a fresh transport request every
//! time, so any request value can be sent repeatedly.

use std::sync::Arc;

use crate::auth::{NoopSigner, RequestSigner, SignError, UnsignedRequest};
use crate::error::{Error, RequestError, ResponseError};
use crate::params::ParamMap;
use crate::response::ApiResponse;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Default hostname for all endpoints.
pub const DEFAULT_HOST: &str = "api.yelp.com";

/// HTTP method for a request. The API surface only ever uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A sendable API request, statically tied to its response type.
pub trait ApiRequest: Send + Sync {
    /// The response this request parses into.
    type Response: ApiResponse;

    /// Hostname of the endpoint.
    fn host(&self) -> &str {
        DEFAULT_HOST
    }

    /// Path of the endpoint, starting with `/`.
    fn path(&self) -> &str;

    /// HTTP method.
    fn method(&self) -> Method {
        Method::Get
    }

    /// The flattened query parameters.
    fn parameters(&self) -> &ParamMap;

    /// Pre-flight validation, run before signing or any network call.
    ///
    /// Typed request constructors make invalid requests unrepresentable, so
    /// the default accepts; hand-built requests can refuse here (a search
    /// without a location reports [`RequestError::NoLocationData`]).
    fn validate(&self) -> Result<(), RequestError> {
        Ok(())
    }
}

/// Dispatcher for typed requests.
///
/// Owns the transport and signing capabilities; everything else lives on the
/// request values themselves.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,
    base_url: Option<String>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Sends a request and classifies the outcome.
    ///
    /// Returns `Ok(response)` for every body the endpoint could parse — even
    /// when the response carries a server-reported error; check
    /// [`ApiResponse::error`] (or [`ApiResponse::was_successful`]) on the
    /// result. `Err` means no response object exists: the request never went
    /// out, the transport failed, the body was empty, or it could not be
    /// parsed.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, Error> {
        request.validate()?;

        let url = match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), request.path()),
            None => format!("https://{}{}", request.host(), request.path()),
        };
        tracing::debug!(url = %url, "sending request");

        let unsigned = UnsignedRequest {
            method: request.method(),
            url,
            params: request.parameters().clone(),
        };
        let signed = self.signer.sign(unsigned).map_err(|err| match err {
            SignError::MissingToken => Error::Response(ResponseError::TokenMissing),
            SignError::Failed(detail) => {
                tracing::warn!(error = %detail, "request signing failed");
                Error::Request(RequestError::FailedToGenerateRequest)
            }
        })?;

        let reply = self.transport.send(signed).await;

        if let Some(failure) = reply.error {
            return Err(RequestError::FailedToSendRequest(failure).into());
        }

        let body = match reply.body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ResponseError::NoDataReceived.into()),
        };

        let response = R::Response::parse(&body)
            .map_err(|cause| Error::Response(ResponseError::FailedToParse(cause)))?;

        if let Some(error) = response.error() {
            tracing::debug!(error = %error, "response carried a service error");
        }
        Ok(response)
    }
}

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

/// Builder wiring a [`Client`] to its capabilities.
#[derive(Default)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn RequestSigner>>,
    base_url: Option<String>,
}

impl ClientBuilder {
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn signer(mut self, signer: impl RequestSigner + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Overrides scheme and host for every request sent through the client.
    /// Requests keep contributing their paths; mock servers and proxies
    /// contribute the rest.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Client {
        Client {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
            signer: self.signer.unwrap_or_else(|| Arc::new(NoopSigner)),
            base_url: self.base_url,
        }
    }
}
