//! v2 domain models.
//!
//! Immutable snapshots of one JSON object each. Field optionality mirrors the
//! wire schema exactly: a business with no phone has `phone: None`, a deal
//! with no end carries no `end_time`, and so on. Each parse produces fresh
//! independent values; a business has no identity beyond its `id` string.

use serde_json::Value;

use crate::decode;
use crate::error::ParseError;

/// A business returned by the v2 search, business, and phone-search endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    /// Service-assigned id for this business.
    pub id: String,
    /// Whether the business has been claimed by its owner.
    pub claimed: bool,
    /// Whether the business has been permanently closed.
    pub closed: bool,
    pub name: String,
    /// URL of a photo for this business.
    pub image_url: Option<String>,
    /// URL of the business page.
    pub url: String,
    /// URL of the mobile business page.
    pub mobile_url: String,
    /// Phone number with international dialing code (e.g. +442079460000).
    pub phone: Option<String>,
    /// Phone number formatted for display.
    pub display_phone: Option<String>,
    pub review_count: u32,
    pub categories: Vec<Category>,
    pub rating: Rating,
    pub snippet: Snippet,
    pub location: Location,
    /// Present only when the business has deals.
    pub deals: Option<Vec<Deal>>,
    /// Present only when gift certificates are available.
    pub gift_certificates: Option<Vec<GiftCertificate>>,
    pub menu_provider: Option<String>,
    /// Unix timestamp of the last menu update.
    pub menu_date_updated: Option<i64>,
    /// Reservation action link; present only when requested and supported.
    pub reservation_url: Option<String>,
    /// Delivery action link; present only when requested and supported.
    pub eat24_url: Option<String>,
}

impl Business {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            id: decode::required(payload, "id")?,
            claimed: decode::required(payload, "is_claimed")?,
            closed: decode::required(payload, "is_closed")?,
            name: decode::required(payload, "name")?,
            image_url: decode::optional(payload, "image_url")?,
            url: decode::required(payload, "url")?,
            mobile_url: decode::required(payload, "mobile_url")?,
            phone: decode::optional(payload, "phone")?,
            display_phone: decode::optional(payload, "display_phone")?,
            review_count: decode::required(payload, "review_count")?,
            categories: decode::required_array(payload, "categories", Category::from_json)?,
            rating: Rating::from_json(payload)?,
            snippet: Snippet::from_json(payload)?,
            location: decode::required_object(payload, "location", Location::from_json)?,
            deals: decode::optional_array(payload, "deals", Deal::from_json)?,
            gift_certificates: decode::optional_array(
                payload,
                "gift_certificates",
                GiftCertificate::from_json,
            )?,
            menu_provider: decode::optional(payload, "menu_provider")?,
            menu_date_updated: decode::optional(payload, "menu_date_updated")?,
            reservation_url: decode::optional(payload, "reservation_url")?,
            eat24_url: decode::optional(payload, "eat24_url")?,
        })
    }
}

/// A category name/alias pair. On the v2 wire this is a two-element array,
/// `["Local Flavor", "localflavor"]`; the alias is the value accepted by the
/// `category_filter` search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub alias: String,
}

impl Category {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        let pair: Vec<String> = serde_json::from_value(payload.clone())
            .map_err(|_| ParseError::invalid("categories", payload.to_string()))?;
        match pair.as_slice() {
            [name, alias] => Ok(Self {
                name: name.clone(),
                alias: alias.clone(),
            }),
            _ => Err(ParseError::invalid("categories", payload.to_string())),
        }
    }
}

/// Star rating plus the service-rendered rating images.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    /// Value ranges over 1, 1.5, ... 4.5, 5.
    pub rating: f64,
    /// 84x17 rating image.
    pub image_url: String,
    /// 50x10 rating image.
    pub small_image_url: String,
    /// 166x30 rating image.
    pub large_image_url: String,
}

impl Rating {
    /// Decodes from the business object itself; the rating fields are flat on
    /// the wire, not nested.
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            rating: decode::required(payload, "rating")?,
            image_url: decode::required(payload, "rating_img_url")?,
            small_image_url: decode::required(payload, "rating_img_url_small")?,
            large_image_url: decode::required(payload, "rating_img_url_large")?,
        })
    }
}

/// Review snippet associated with a business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub text: Option<String>,
    pub image_url: Option<String>,
}

impl Snippet {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            text: decode::optional(payload, "snippet_text")?,
            image_url: decode::optional(payload, "snippet_image_url")?,
        })
    }
}

/// Address and position data for a business.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Address fields only.
    pub address: Vec<String>,
    /// Full display address including cross streets, city and state.
    pub display_address: Vec<String>,
    pub city: String,
    /// ISO 3166-2 state code.
    pub state_code: String,
    pub postal_code: Option<String>,
    /// ISO 3166-1 country code.
    pub country_code: String,
    pub cross_streets: Option<String>,
    pub neighborhoods: Option<Vec<String>>,
    /// Omitted on the wire when coordinates are not known.
    pub coordinate: Option<Coordinate>,
    pub geo_accuracy: f64,
}

impl Location {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            address: decode::required(payload, "address")?,
            display_address: decode::required(payload, "display_address")?,
            city: decode::required(payload, "city")?,
            state_code: decode::required(payload, "state_code")?,
            postal_code: decode::optional(payload, "postal_code")?,
            country_code: decode::required(payload, "country_code")?,
            cross_streets: decode::optional(payload, "cross_streets")?,
            neighborhoods: decode::optional(payload, "neighborhoods")?,
            coordinate: decode::optional_object(payload, "coordinate", Coordinate::from_json)?,
            geo_accuracy: decode::required(payload, "geo_accuracy")?,
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

/// Deal info attached to a business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Deal start, Unix timestamp.
    pub start_time: i64,
    /// Present only when the deal ends.
    pub end_time: Option<i64>,
    /// Present on the wire only when true.
    pub popular: Option<bool>,
    /// Additional details, newline separated.
    pub details: String,
    pub important_restrictions: String,
    pub additional_restrictions: String,
    pub options: Vec<DealOption>,
}

impl Deal {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            id: decode::required(payload, "id")?,
            title: decode::required(payload, "title")?,
            url: decode::required(payload, "url")?,
            image_url: decode::required(payload, "image_url")?,
            currency_code: decode::required(payload, "currency_code")?,
            start_time: decode::required(payload, "time_start")?,
            end_time: decode::optional(payload, "time_end")?,
            popular: decode::optional(payload, "is_popular")?,
            details: decode::required(payload, "what_you_get")?,
            important_restrictions: decode::required(payload, "important_restrictions")?,
            additional_restrictions: decode::required(payload, "additional_restrictions")?,
            options: decode::required_array(payload, "options", DealOption::from_json)?,
        })
    }
}

/// One purchasable option of a deal. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealOption {
    pub title: String,
    pub purchase_url: String,
    pub price: i64,
    /// Formatted price, e.g. `"$6"`.
    pub formatted_price: String,
    pub original_price: i64,
    pub formatted_original_price: String,
    pub limited_quantity: bool,
    /// Present only when the deal is limited.
    pub remaining_count: Option<i64>,
}

impl DealOption {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            title: decode::required(payload, "title")?,
            purchase_url: decode::required(payload, "purchase_url")?,
            price: decode::required(payload, "price")?,
            formatted_price: decode::required(payload, "formatted_price")?,
            original_price: decode::required(payload, "original_price")?,
            formatted_original_price: decode::required(payload, "formatted_original_price")?,
            limited_quantity: decode::required(payload, "is_quantity_limited")?,
            remaining_count: decode::optional(payload, "remaining_count")?,
        })
    }
}

/// Gift certificate info attached to a business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCertificate {
    pub id: String,
    pub url: String,
    pub image_url: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Whether unused balances return as cash or store credit.
    pub unused_balances: String,
    pub options: Vec<GiftCertificateOption>,
}

impl GiftCertificate {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            id: decode::required(payload, "id")?,
            url: decode::required(payload, "url")?,
            image_url: decode::required(payload, "image_url")?,
            currency_code: decode::required(payload, "currency_code")?,
            unused_balances: decode::required(payload, "unused_balances")?,
            options: decode::required_array(payload, "options", GiftCertificateOption::from_json)?,
        })
    }
}

/// One denomination of a gift certificate. Price is integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCertificateOption {
    pub price: i64,
    /// Formatted price, e.g. `"$50"`.
    pub formatted_price: String,
}

impl GiftCertificateOption {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            price: decode::required(payload, "price")?,
            formatted_price: decode::required(payload, "formatted_price")?,
        })
    }
}

/// Suggested map bounds for displaying a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub span: Option<RegionSpan>,
    pub center: RegionCenter,
}

impl Region {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            span: decode::optional_object(payload, "span", RegionSpan::from_json)?,
            center: decode::required_object(payload, "center", RegionCenter::from_json)?,
        })
    }
}

/// Width and height of the suggested map bounds, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl RegionSpan {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            latitude_delta: decode::required(payload, "latitude_delta")?,
            longitude_delta: decode::required(payload, "longitude_delta")?,
        })
    }
}

/// Center of the suggested map bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionCenter {
    pub latitude: f64,
    pub longitude: f64,
}

impl RegionCenter {
    pub(crate) fn from_json(payload: &Value) -> Result<Self, ParseError> {
        Ok(Self {
            latitude: decode::required(payload, "latitude")?,
            longitude: decode::required(payload, "longitude")?,
        })
    }
}
