//! v3 domain models.

use serde_json::Value;

use crate::decode;
use crate::error::ParseError;

/// A business returned by the v3 search endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    /// Category pairs associated with this business.
    pub categories: Vec<Category>,
    pub coordinates: Coordinate,
    /// Phone number formatted for display; absent when the business has no
    /// phone on record.
    pub display_phone: Option<String>,
    /// Distance in meters from the search location, regardless of locale.
    pub distance: f64,
    /// Service-assigned id for this business.
    pub id: String,
    /// URL of a photo for this business.
    pub image_url: Option<String>,
    /// Whether the business has been permanently closed.
    pub closed: bool,
    pub location: Location,
    pub name: String,
    pub phone: Option<String>,
    /// Price level, decoded from the service's dollar-sign string.
    pub price: Price,
    /// Value ranges over 1, 1.5, ... 4.5, 5.
    pub rating: f64,
    pub review_count: u32,
    /// URL of the business page.
    pub url: url::Url,
    /// Transactions the business is registered for.
    pub transactions: Vec<Transaction>,
}

impl Business {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        let raw_price: String = decode::required(payload, "price")?;
        let price = Price::from_dollar_signs(&raw_price)
            .ok_or_else(|| ParseError::invalid("price", raw_price.clone()))?;

        let raw_url: String = decode::required(payload, "url")?;
        let url = url::Url::parse(&raw_url)
            .map_err(|_| ParseError::invalid("url", raw_url.clone()))?;

        let raw_transactions: Vec<String> = decode::required(payload, "transactions")?;
        let transactions = raw_transactions
            .iter()
            .map(|raw| {
                Transaction::from_wire(raw)
                    .ok_or_else(|| ParseError::invalid("transactions", raw.clone()))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            categories: decode::required_array(payload, "categories", Category::from_json)?,
            coordinates: decode::required_object(payload, "coordinates", Coordinate::from_json)?,
            display_phone: decode::optional(payload, "display_phone")?,
            distance: decode::required(payload, "distance")?,
            id: decode::required(payload, "id")?,
            image_url: decode::optional(payload, "image_url")?,
            closed: decode::required(payload, "is_closed")?,
            location: decode::required_object(payload, "location", Location::from_json)?,
            name: decode::required(payload, "name")?,
            phone: decode::optional(payload, "phone")?,
            price,
            rating: decode::required(payload, "rating")?,
            review_count: decode::required(payload, "review_count")?,
            url,
            transactions,
        })
    }
}

/// A category title/alias pair. Unlike v2, the v3 wire carries these as
/// objects with `alias` and `title` members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub alias: String,
    pub title: String,
}

impl Category {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            alias: decode::required(payload, "alias")?,
            title: decode::required(payload, "title")?,
        })
    }
}

/// A decoded latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            latitude: decode::required(payload, "latitude")?,
            longitude: decode::required(payload, "longitude")?,
        })
    }
}

/// Address data for a v3 business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Lines that, stacked vertically, give the standard address format for
    /// the business's country.
    pub display_address: Vec<String>,
    /// ISO 3166-2 (with a few exceptions) state code.
    pub state: String,
    pub zip_code: String,
}

impl Location {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            address1: decode::required(payload, "address1")?,
            address2: decode::optional(payload, "address2")?,
            address3: decode::optional(payload, "address3")?,
            city: decode::required(payload, "city")?,
            country: decode::required(payload, "country")?,
            display_address: decode::optional(payload, "display_address")?.unwrap_or_default(),
            state: decode::required(payload, "state")?,
            zip_code: decode::required(payload, "zip_code")?,
        })
    }
}

/// Price level, a 1-5 ordinal.
///
/// On the wire this is a string of one to five `$` characters and nothing
/// else; any other string fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Price {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Price {
    /// Decodes `"$"` through `"$$$$$"` (surrounding whitespace tolerated).
    pub fn from_dollar_signs(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().any(|c| c != '$') {
            return None;
        }
        match trimmed.len() {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// A transaction type the business is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Pickup,
    Delivery,
    Reservation,
}

impl Transaction {
    pub(crate) fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "pickup" => Some(Self::Pickup),
            "delivery" => Some(Self::Delivery),
            "restaurant_reservation" => Some(Self::Reservation),
            _ => None,
        }
    }
}
