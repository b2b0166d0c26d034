//! The bearer-token v3 endpoints: token grant and business search.
//!
//! v3 reports errors as `{"error": {"code": ...}}` and authenticates with an
//! access token obtained from `POST /oauth2/token/`.

mod models;
mod response;
mod search;
mod token;

pub use models::{Business, Category, Coordinate, Location, Price, Transaction};
pub use response::{SearchResponse, classify_error};
pub use search::{
    Address, Attribute, Attributes, Categories, Latitude, Limit, Locale, Longitude, OpenFilter,
    Offset, Price as PriceFilter, PriceLevel, Radius, SearchLocation, SearchParameters,
    SearchRequest, SortMode, Term,
};
pub use token::{ClientId, ClientSecret, GrantType, TokenParameters, TokenRequest, TokenResponse, TokenType};

pub(crate) mod endpoints {
    pub const TOKEN: &str = "/oauth2/token/";
    pub const SEARCH: &str = "/v3/businesses/search";
}
