//! HTTP transport abstraction.
//!
//! The crate never talks to the network directly; everything goes through an
//! injectable [`HttpTransport`] so tests can substitute a synthetic transport
//! and applications can bring their own client configuration. The shipped
//! implementation is backed by `reqwest`.
//!
//! A transport must resolve every send to exactly one [`TransportReply`] —
//! success, HTTP failure, or transport failure all come back through the same
//! struct rather than a panic or a hung future. Timeouts and connection
//! pooling are transport concerns and are not handled above this seam.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::TransportFailure;
use crate::request::Method;

/// A fully signed, ready-to-send request.
///
/// `params` is the flattened string-to-string map: rendered as the query
/// string for GET requests and as a form body for POST requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub params: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

/// The outcome of one transport send.
///
/// Mirrors the classic `(data, status, error)` completion triple: a reply may
/// carry a body, a status, a failure, or any combination (a failed read after
/// headers, for example, has both a status and an error).
#[derive(Debug, Clone, Default)]
pub struct TransportReply {
    pub body: Option<Vec<u8>>,
    pub status: Option<u16>,
    pub error: Option<TransportFailure>,
}

impl TransportReply {
    pub fn success(status: u16, body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            status: Some(status),
            error: None,
        }
    }

    pub fn failure(error: TransportFailure) -> Self {
        Self {
            body: None,
            status: None,
            error: Some(error),
        }
    }
}

/// The injectable HTTP capability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a signed request and resolves to exactly one reply.
    async fn send(&self, request: SignedRequest) -> TransportReply;

    /// Fetches raw bytes from a bare URL. Used by the image loader.
    async fn fetch(&self, url: &str) -> TransportReply {
        self.send(SignedRequest {
            method: Method::Get,
            url: url.to_string(),
            params: BTreeMap::new(),
            headers: BTreeMap::new(),
        })
        .await
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-configured client (proxies, timeouts, pools).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: SignedRequest) -> TransportReply {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url).query(&request.params),
            Method::Post => self.client.post(&request.url).form(&request.params),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %request.url, error = %err, "transport send failed");
                return TransportReply::failure(classify_reqwest_error(&err));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => TransportReply {
                body: Some(bytes.to_vec()),
                status: Some(status),
                error: None,
            },
            Err(err) => {
                tracing::warn!(url = %request.url, error = %err, "transport body read failed");
                TransportReply {
                    body: None,
                    status: Some(status),
                    error: Some(classify_reqwest_error(&err)),
                }
            }
        }
    }
}

fn classify_reqwest_error(err: &reqwest::Error) -> TransportFailure {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else if err.is_request() {
        "request"
    } else {
        "io"
    };
    TransportFailure::new(kind, err.to_string())
}
