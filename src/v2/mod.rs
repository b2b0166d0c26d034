//! The OAuth1-era v2 endpoints: search, business lookup, and phone search.
//!
//! All three share the locale/actionlink ambient parameters and the
//! `{"error": {"id": ..., "field": ...}}` error envelope.

mod business;
mod models;
mod phone;
mod response;
mod search;

pub use business::BusinessRequest;
pub use models::{
    Business, Category, Coordinate, Deal, DealOption, GiftCertificate, GiftCertificateOption,
    Location, Rating, Region, RegionCenter, RegionSpan, Snippet,
};
pub use phone::{Category as PhoneCategory, Phone, PhoneSearchParameters, PhoneSearchRequest};
pub use response::{BusinessResponse, PhoneSearchResponse, SearchResponse, classify_error};
pub use search::{
    Categories, Deals, Limit, Offset, Radius, SearchParameters, SearchRequest, SortMode, Term,
};

pub(crate) mod endpoints {
    pub const SEARCH: &str = "/v2/search/";
    pub const BUSINESS: &str = "/v2/business/";
    pub const PHONE: &str = "/v2/phone_search/";
}
