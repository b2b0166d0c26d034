//! v3 search request.

use crate::params::{
    ParamMap, Parameter, array_parameter, double_parameter, int_parameter, string_parameter,
};
use crate::request::ApiRequest;
use crate::v3::endpoints;
use crate::v3::models::Price as PriceLevelOrdinal;
use crate::v3::response::SearchResponse;

string_parameter!(
    /// Search term, e.g. "food". When omitted the search covers everything.
    Term,
    "term"
);

int_parameter!(
    /// Search radius in meters, maximum 40000 (25 miles).
    Radius,
    "radius"
);

array_parameter!(
    /// Category aliases to filter the search results with.
    Categories,
    "categories",
    String
);

string_parameter!(
    /// Locale code, e.g. `en_US`.
    Locale,
    "locale"
);

int_parameter!(
    /// Number of business results to return. Defaults to 20 server-side,
    /// maximum 50.
    Limit,
    "limit"
);

int_parameter!(
    /// Offset the returned results by this amount.
    Offset,
    "offset"
);

/// v3 result ordering.
///
/// The rating sort is not strictly by rating value; the service uses an
/// adjusted value that accounts for the number of ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    BestMatch,
    Rating,
    ReviewCount,
    Distance,
}

impl Parameter for SortMode {
    fn key(&self) -> &'static str {
        "sort_by"
    }

    fn value(&self) -> String {
        match self {
            Self::BestMatch => "best_match",
            Self::Rating => "rating",
            Self::ReviewCount => "review_count",
            Self::Distance => "distance",
        }
        .to_string()
    }
}

/// One price level for the price filter. Renders as its ordinal.
pub type PriceLevel = PriceLevelOrdinal;

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

array_parameter!(
    /// Price levels to filter the search results with, e.g. `1,2,3`.
    Price,
    "price",
    PriceLevel
);

impl Price {
    /// An inclusive range of price levels.
    pub fn range(low: PriceLevel, high: PriceLevel) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let levels = (low.ordinal()..=high.ordinal())
            .filter_map(|ordinal| match ordinal {
                1 => Some(PriceLevel::One),
                2 => Some(PriceLevel::Two),
                3 => Some(PriceLevel::Three),
                4 => Some(PriceLevel::Four),
                5 => Some(PriceLevel::Five),
                _ => None,
            })
            .collect();
        Self(levels)
    }
}

/// Additional search filters. Businesses must satisfy all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Hot and new businesses.
    HotAndNew,
    /// Businesses with the request-a-quote feature.
    RequestAQuote,
    /// Businesses with an online waitlist.
    WaitlistReservation,
    /// Businesses offering cash back.
    Cashback,
    /// Businesses offering deals.
    Deals,
    /// Businesses providing gender neutral restrooms.
    GenderNeutralRestrooms,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::HotAndNew => "hot_and_new",
            Self::RequestAQuote => "request_a_quote",
            Self::WaitlistReservation => "waitlist_reservation",
            Self::Cashback => "cashback",
            Self::Deals => "deals",
            Self::GenderNeutralRestrooms => "gender_neutral_restrooms",
        })
    }
}

array_parameter!(
    /// Attribute filters, comma joined.
    Attributes,
    "attributes",
    Attribute
);

string_parameter!(
    /// Free-text search address: "address, neighborhood, city, state or zip,
    /// optional country".
    Address,
    "location"
);

double_parameter!(
    /// Latitude of the location to search near.
    Latitude,
    "latitude"
);

double_parameter!(
    /// Longitude of the location to search near.
    Longitude,
    "longitude"
);

/// Where a v3 search happens: a free-text address or a coordinate pair.
/// A closed choice, so a request always carries exactly one of the two.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    /// Renders under `location`.
    Address(Address),
    /// Renders under `latitude` and `longitude`.
    Point {
        latitude: Latitude,
        longitude: Longitude,
    },
}

impl SearchLocation {
    pub fn address(text: impl Into<Address>) -> Self {
        Self::Address(text.into())
    }

    pub fn point(latitude: f64, longitude: f64) -> Self {
        Self::Point {
            latitude: Latitude(latitude),
            longitude: Longitude(longitude),
        }
    }

    fn write_into(&self, params: &mut ParamMap) {
        match self {
            Self::Address(address) => params.insert(address),
            Self::Point {
                latitude,
                longitude,
            } => {
                params.insert(latitude);
                params.insert(longitude);
            }
        }
    }
}

/// The open-hours filter. `open_now` and `open_at` cannot be used together,
/// so they are one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFilter {
    /// Only businesses open now. Renders under `open_now`.
    Now(bool),
    /// Only businesses open at the given Unix time, interpreted in the
    /// timezone of the search location. Renders under `open_at`.
    At(i64),
}

impl Parameter for OpenFilter {
    fn key(&self) -> &'static str {
        match self {
            Self::Now(_) => "open_now",
            Self::At(_) => "open_at",
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Now(open) => open.to_string(),
            Self::At(timestamp) => timestamp.to_string(),
        }
    }
}

/// Everything a v3 search can be filtered by.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    pub location: SearchLocation,
    pub term: Option<Term>,
    pub radius: Option<Radius>,
    pub categories: Option<Categories>,
    pub locale: Option<Locale>,
    pub limit: Option<Limit>,
    pub offset: Option<Offset>,
    pub sort_by: Option<SortMode>,
    pub price: Option<Price>,
    pub open: Option<OpenFilter>,
    pub attributes: Option<Attributes>,
}

impl SearchParameters {
    pub fn new(location: SearchLocation) -> Self {
        Self {
            location,
            term: None,
            radius: None,
            categories: None,
            locale: None,
            limit: None,
            offset: None,
            sort_by: None,
            price: None,
            open: None,
            attributes: None,
        }
    }
}

/// `GET /v3/businesses/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    parameters: ParamMap,
}

impl SearchRequest {
    pub fn new(search: SearchParameters) -> Self {
        let mut parameters = ParamMap::new();
        search.location.write_into(&mut parameters);
        parameters.insert_optional(search.term.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.radius.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.categories.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.locale.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.limit.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.offset.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.sort_by.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.price.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.open.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.attributes.as_ref().map(|p| p as &dyn Parameter));
        Self { parameters }
    }
}

impl ApiRequest for SearchRequest {
    type Response = SearchResponse;

    fn path(&self) -> &str {
        endpoints::SEARCH
    }

    fn parameters(&self) -> &ParamMap {
        &self.parameters
    }
}
