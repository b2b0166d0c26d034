//! v2 search request.

use crate::params::locale::{ActionlinkParameters, LocaleParameters};
use crate::params::location::Location;
use crate::params::{ParamMap, Parameter, array_parameter, bool_parameter, int_parameter, string_parameter};
use crate::request::ApiRequest;
use crate::v2::endpoints;
use crate::v2::response::SearchResponse;

string_parameter!(
    /// Search term, e.g. "food" or a business name such as "Starbucks".
    /// When omitted the search covers everything.
    Term,
    "term"
);

int_parameter!(
    /// Number of business results to return.
    Limit,
    "limit"
);

int_parameter!(
    /// Offset the returned results by this amount.
    Offset,
    "offset"
);

int_parameter!(
    /// Search radius in meters. The maximum is 40000 meters (25 miles);
    /// values that cover too much area come back as an AREA_TOO_LARGE error.
    Radius,
    "radius_filter"
);

bool_parameter!(
    /// Whether to exclusively search for businesses with deals.
    Deals,
    "deals_filter"
);

array_parameter!(
    /// Category aliases to filter search results with.
    Categories,
    "category_filter",
    String
);

/// v2 result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    BestMatch,
    Distance,
    HighestRated,
}

impl Parameter for SortMode {
    fn key(&self) -> &'static str {
        "sort"
    }

    fn value(&self) -> String {
        let ordinal = match self {
            Self::BestMatch => 0,
            Self::Distance => 1,
            Self::HighestRated => 2,
        };
        ordinal.to_string()
    }
}

/// Everything a v2 search can be filtered by. The location is the one
/// required piece; it is consumed once to build a request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    pub location: Location,
    pub term: Option<Term>,
    pub limit: Option<Limit>,
    pub offset: Option<Offset>,
    pub sort_mode: Option<SortMode>,
    pub categories: Option<Categories>,
    pub radius: Option<Radius>,
    pub filter_deals: Option<Deals>,
}

impl SearchParameters {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            term: None,
            limit: None,
            offset: None,
            sort_mode: None,
            categories: None,
            radius: None,
            filter_deals: None,
        }
    }
}

/// `GET /v2/search/`.
///
/// One-shot: the query is fixed at construction. To search again with
/// different parameters, build a new request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    parameters: ParamMap,
}

impl SearchRequest {
    pub fn new(search: SearchParameters) -> Self {
        Self::with_ambient(search, None, None)
    }

    /// Builds the request with the ambient locale/actionlink parameters the
    /// application has configured.
    pub fn with_ambient(
        search: SearchParameters,
        locale: Option<&LocaleParameters>,
        actionlink: Option<&ActionlinkParameters>,
    ) -> Self {
        let mut parameters = ParamMap::new();

        parameters.insert(&search.location);
        if let Some(hint) = search.location.hint() {
            parameters.insert(&hint);
        }
        parameters.insert_optional(search.term.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.limit.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.offset.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.sort_mode.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.categories.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.radius.as_ref().map(|p| p as &dyn Parameter));
        parameters.insert_optional(search.filter_deals.as_ref().map(|p| p as &dyn Parameter));

        if let Some(locale) = locale {
            locale.write_into(&mut parameters);
        }
        if let Some(actionlink) = actionlink {
            actionlink.write_into(&mut parameters);
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::location::Coordinate;

    #[test]
    fn free_text_search_builds_exactly_the_given_parameters() {
        let mut search = SearchParameters::new(Location::free_text("Portland, OR"));
        search.term = Some("food".into());
        search.limit = Some(Limit(20));
        let request = SearchRequest::new(search);

        let params = request.parameters();
        assert_eq!(params.get("location"), Some("Portland, OR"));
        assert_eq!(params.get("term"), Some("food"));
        assert_eq!(params.get("limit"), Some("20"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn location_specifiers_are_mutually_exclusive_in_the_map() {
        let free_text = SearchRequest::new(SearchParameters::new(Location::free_text("Portland")));
        assert!(free_text.parameters().contains_key("location"));
        assert!(!free_text.parameters().contains_key("ll"));
        assert!(!free_text.parameters().contains_key("bounds"));

        let point = SearchRequest::new(SearchParameters::new(Location::point(Coordinate::new(
            45.5, -122.6,
        ))));
        assert!(point.parameters().contains_key("ll"));
        assert!(!point.parameters().contains_key("location"));
        assert!(!point.parameters().contains_key("bounds"));

        let bounds = SearchRequest::new(SearchParameters::new(Location::bounding_box(
            Coordinate::new(45.4, -122.7),
            Coordinate::new(45.6, -122.5),
        )));
        assert!(bounds.parameters().contains_key("bounds"));
        assert!(!bounds.parameters().contains_key("location"));
        assert!(!bounds.parameters().contains_key("ll"));
    }

    #[test]
    fn free_text_hint_contributes_cll() {
        let request = SearchRequest::new(SearchParameters::new(Location::free_text_with_hint(
            "Portland, OR",
            Coordinate::new(45.52, -122.68),
        )));
        assert_eq!(request.parameters().get("cll"), Some("45.52,-122.68"));
    }

    #[test]
    fn sort_mode_renders_ordinals() {
        assert_eq!(SortMode::BestMatch.value(), "0");
        assert_eq!(SortMode::Distance.value(), "1");
        assert_eq!(SortMode::HighestRated.value(), "2");
    }

    #[test]
    fn ambient_locale_parameters_merge_in() {
        let locale = LocaleParameters {
            country_code: Some("US".into()),
            language: Some("en".into()),
            filter_language: None,
        };
        let request = SearchRequest::with_ambient(
            SearchParameters::new(Location::free_text("Portland")),
            Some(&locale),
            None,
        );
        assert_eq!(request.parameters().get("cc"), Some("US"));
        assert_eq!(request.parameters().get("lang"), Some("en"));
    }
}
