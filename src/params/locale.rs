//! v2 locale and actionlink parameters.
//!
//! Optional ambient parameters that can be attached to any v2 request.
//! Results are localized when both the country code and language are given.

use crate::params::{ParamMap, Parameter, bool_parameter, string_parameter};

string_parameter!(
    /// ISO 3166-1 alpha-2 country code, used when parsing the location field.
    CountryCode,
    "cc"
);

string_parameter!(
    /// ISO 639 language code. Reviews and snippets written in the specified
    /// language will be shown.
    Language,
    "lang"
);

bool_parameter!(
    /// Whether to filter business reviews by the specified language.
    FilterLanguage,
    "lang_filter"
);

/// Optional locale parameters shared by the v2 endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleParameters {
    pub country_code: Option<CountryCode>,
    pub language: Option<Language>,
    pub filter_language: Option<FilterLanguage>,
}

impl LocaleParameters {
    pub(crate) fn write_into(&self, params: &mut ParamMap) {
        params.insert_optional(self.country_code.as_ref().map(|p| p as &dyn Parameter));
        params.insert_optional(self.language.as_ref().map(|p| p as &dyn Parameter));
        params.insert_optional(self.filter_language.as_ref().map(|p| p as &dyn Parameter));
    }
}

bool_parameter!(
    /// Whether responses should include action links (reservation and
    /// delivery URLs) on businesses that support them.
    ActionLinks,
    "actionlinks"
);

/// Optional actionlink parameters shared by the v2 endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionlinkParameters {
    pub actionlinks: Option<ActionLinks>,
}

impl ActionlinkParameters {
    pub(crate) fn write_into(&self, params: &mut ParamMap) {
        params.insert_optional(self.actionlinks.as_ref().map(|p| p as &dyn Parameter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parameters_render_under_their_keys() {
        let locale = LocaleParameters {
            country_code: Some("GB".into()),
            language: Some("en".into()),
            filter_language: Some(FilterLanguage(true)),
        };
        let mut params = ParamMap::new();
        locale.write_into(&mut params);
        assert_eq!(params.get("cc"), Some("GB"));
        assert_eq!(params.get("lang"), Some("en"));
        assert_eq!(params.get("lang_filter"), Some("true"));
    }

    #[test]
    fn absent_locale_fields_contribute_nothing() {
        let mut params = ParamMap::new();
        LocaleParameters::default().write_into(&mut params);
        ActionlinkParameters::default().write_into(&mut params);
        assert!(params.is_empty());
    }
}
