//! v2 business lookup request.

use crate::params::ParamMap;
use crate::params::locale::{ActionlinkParameters, LocaleParameters};
use crate::request::ApiRequest;
use crate::v2::endpoints;
use crate::v2::response::BusinessResponse;

/// `GET /v2/business/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRequest {
    path: String,
    parameters: ParamMap,
}

impl BusinessRequest {
    pub fn new(business_id: impl AsRef<str>) -> Self {
        Self::with_ambient(business_id, None, None)
    }

    pub fn with_ambient(
        business_id: impl AsRef<str>,
        locale: Option<&LocaleParameters>,
        actionlink: Option<&ActionlinkParameters>,
    ) -> Self {
        let mut parameters = ParamMap::new();
        if let Some(locale) = locale {
            locale.write_into(&mut parameters);
        }
        if let Some(actionlink) = actionlink {
            actionlink.write_into(&mut parameters);
        }
        Self {
            path: format!("{}{}", endpoints::BUSINESS, business_id.as_ref()),
            parameters,
        }
    }
}

impl ApiRequest for BusinessRequest {
    type Response = BusinessResponse;

    fn path(&self) -> &str {
        &self.path
    }

    fn parameters(&self) -> &ParamMap {
        &self.parameters
    }
}
