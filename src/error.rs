//! Error taxonomy.
//!
//! Three disjoint kinds of failure, deliberately kept apart:
//! - [`RequestError`] — the call never reached the server (construction,
//!   signing, or transport failure),
//! - [`ResponseError`] — the server replied with a structured error,
//! - [`ParseError`] — the server replied but the body couldn't be understood.
//!
//! A response that carries a server-reported error and one that fails to parse
//! are distinguishable to callers: the former yields a populated, error-tagged
//! response object, the latter yields no response object at all.

use thiserror::Error;

/// Any error a request can produce, request-side or response-side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Transport-level failure detail.
///
/// Underlying transport errors are carried as a tagged payload rather than an
/// opaque error object so that equality and test assertions stay well-defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// Short machine-readable kind, e.g. `"connect"`, `"timeout"`, `"io"`.
    pub kind: String,
    /// Human-readable detail from the underlying transport, if any.
    pub detail: Option<String>,
}

impl TransportFailure {
    pub fn new(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: Some(detail.into()),
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.kind, detail),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Errors that occur while trying to build or send a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The signed transport request could not be generated, usually because
    /// credentials are missing or the URL is malformed. Not retryable without
    /// fixing the client configuration.
    #[error("failed to generate the network request")]
    FailedToGenerateRequest,
    /// The request failed at the transport level, see the wrapped failure.
    #[error("failed to send request ({0})")]
    FailedToSendRequest(TransportFailure),
    /// The request requires a search location and none was provided. Caught
    /// before any network call is made.
    #[error("a search location must be provided before sending")]
    NoLocationData,
}

/// Errors reported by the service in a response, or found while producing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// An internal service error occurred.
    #[error("an internal service error has occurred")]
    InternalError,
    /// The number of requests for the api key has exceeded its limit.
    #[error("the number of requests for the api used has exceeded its limit")]
    ExceededRequests,
    /// A required parameter was missing.
    #[error("a required parameter was missing: '{field}'")]
    MissingParameter { field: String },
    /// A parameter was invalid.
    #[error("a parameter was invalid: '{field}'")]
    InvalidParameter { field: String },
    /// The service is not available for the requested location.
    #[error("the service is unavailable in the requested location")]
    UnavailableForLocation,
    /// The search area is too large.
    #[error("the search area is too large")]
    AreaTooLarge,
    /// The service was unable to disambiguate the search location.
    #[error("the search location could not be disambiguated")]
    MultipleLocations,
    /// Information for the requested business is unavailable.
    #[error("information for that business is unavailable")]
    BusinessUnavailable,
    /// The response arrived without a body.
    #[error("no data was received in the response")]
    NoDataReceived,
    /// A body arrived but could not be decoded, see the wrapped parse error.
    #[error("the received data could not be parsed: {0}")]
    FailedToParse(#[source] ParseError),
    /// The requested resource could not be found.
    #[error("the resource could not be found")]
    NotFound,
    /// An access token must be supplied in order to use this endpoint.
    #[error("an access token must be supplied in order to use this endpoint")]
    TokenMissing,
    /// The service reported an error this client does not recognize.
    #[error("an unknown error has occurred{}", .code.as_deref().map(|c| format!(": {c}")).unwrap_or_default())]
    UnknownError { code: Option<String> },
}

/// Errors found while interpreting response bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The body is not JSON at all.
    #[error("the data is not in JSON format: {cause}")]
    InvalidJson { cause: String },
    /// A required field was missing.
    #[error("a required field <{field}> was missing in the response")]
    Missing { field: String },
    /// A field was present but had an unrecognized shape or value.
    #[error("a piece of data was not recognized <{field}: {value}>")]
    Invalid { field: String, value: String },
    /// The cause of the failure is unknown.
    #[error("the cause of the failure is unknown")]
    Unknown,
}

impl ParseError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            value: value.into(),
        }
    }
}
