//! v2 phone search request.

use crate::params::locale::CountryCode;
use crate::params::{ParamMap, Parameter, string_parameter};
use crate::request::ApiRequest;
use crate::v2::endpoints;
use crate::v2::response::PhoneSearchResponse;

string_parameter!(
    /// Business phone number to search for. Outside of the US and Canada,
    /// include the international dialing code (e.g. +442079460000) or set the
    /// country code parameter.
    Phone,
    "phone"
);

string_parameter!(
    /// Category alias to filter results with.
    Category,
    "category"
);

/// Everything a v2 phone search can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSearchParameters {
    pub phone: Phone,
    /// Default country used when parsing the phone number.
    pub country_code: Option<CountryCode>,
    pub category: Option<Category>,
}

impl PhoneSearchParameters {
    pub fn new(phone: impl Into<Phone>) -> Self {
        Self {
            phone: phone.into(),
            country_code: None,
            category: None,
        }
    }
}

/// `GET /v2/phone_search/`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneSearchRequest {
    parameters: ParamMap,
}

impl PhoneSearchRequest {
    pub fn new(search: PhoneSearchParameters) -> Self {
        let mut parameters = ParamMap::new();
        parameters.insert(&search.phone);
        parameters.insert_optional(search.country_code.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.category.as_ref().map(|p| p as &dyn Parameter));
        Self { parameters }
    }
}

impl ApiRequest for PhoneSearchRequest {
    type Response = PhoneSearchResponse;

    fn path(&self) -> &str {
        endpoints::PHONE
    }

    fn parameters(&self) -> &ParamMap {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_search_builds_phone_parameter() {
        let request = PhoneSearchRequest::new(PhoneSearchParameters::new("+14159083801"));
        assert_eq!(request.parameters().get("phone"), Some("+14159083801"));
        assert_eq!(request.parameters().len(), 1);
    }

    #[test]
    fn optional_filters_render_when_present() {
        let mut search = PhoneSearchParameters::new("+442079460000");
        search.country_code = Some("GB".into());
        search.category = Some("fish_and_chips".into());
        let request = PhoneSearchRequest::new(search);
        assert_eq!(request.parameters().get("cc"), Some("GB"));
        assert_eq!(request.parameters().get("category"), Some("fish_and_chips"));
    }
}
