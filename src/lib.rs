//! chowder
//!
//! Typed client for the Yelp business-search APIs.
//!
//! Two API generations are supported: the OAuth1-era v2 endpoints
//! (`/v2/search/`, `/v2/business/{id}`, `/v2/phone_search/`) and the
//! bearer-token v3 endpoints (`/oauth2/token/`, `/v3/businesses/search`).
//! Requests are built from strongly-typed parameter objects, responses are
//! parsed into immutable domain models, and error conditions are split into
//! three disjoint kinds so callers can always tell "my call never reached the
//! server", "the server rejected my call", and "the server replied but I
//! couldn't understand it" apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use chowder::{ApiResponse, Client, v3};
//!
//! let client = Client::builder()
//!     .signer(chowder::auth::BearerSigner::new(credentials))
//!     .build();
//!
//! let mut params = v3::SearchParameters::new(v3::SearchLocation::address("Portland, OR"));
//! params.term = Some("food".into());
//! params.limit = Some(v3::Limit(20));
//!
//! let response = client.send(&v3::SearchRequest::new(params)).await?;
//! if response.was_successful() {
//!     for business in response.businesses().unwrap_or_default() {
//!         println!("{}", business.name);
//!     }
//! }
//! ```
#![deny(unsafe_code)]

pub mod auth;
pub mod decode;
pub mod error;
pub mod image;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;
pub mod v2;
pub mod v3;

pub use error::{Error, ParseError, RequestError, ResponseError};
pub use request::{Client, ClientBuilder, Method};
pub use response::ApiResponse;
