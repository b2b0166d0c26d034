//! Query parameter encoding.
//!
//! Every value that can appear in a request's query string is a typed wrapper
//! that knows its own key and how to render its value. Rendering is pure and
//! total: no parameter can fail to produce a string. The flattened
//! string-to-string [`ParamMap`] is the only thing handed to transport.
//!
//! `Display` for a parameter renders the value alone, not `key=value`; code
//! that wants the pair formats it from [`Parameter::key`] and
//! [`Parameter::value`] explicitly.

pub mod locale;
pub mod location;

use std::collections::BTreeMap;

/// A single typed query-string contributor.
pub trait Parameter {
    /// The query-string key this parameter renders under.
    fn key(&self) -> &'static str;

    /// The rendered value. Pure and total.
    fn value(&self) -> String;
}

/// Declares a newtype over `String` implementing [`Parameter`].
macro_rules! string_parameter {
    ($(#[$meta:meta])* $name:ident, $key:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub String);

        impl $crate::params::Parameter for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn value(&self) -> String {
                self.0.clone()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::params::Parameter::value(self))
            }
        }
    };
}

/// Declares a newtype over `i64` implementing [`Parameter`].
macro_rules! int_parameter {
    ($(#[$meta:meta])* $name:ident, $key:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl $crate::params::Parameter for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn value(&self) -> String {
                self.0.to_string()
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::params::Parameter::value(self))
            }
        }
    };
}

/// Declares a newtype over `f64` implementing [`Parameter`].
macro_rules! double_parameter {
    ($(#[$meta:meta])* $name:ident, $key:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(pub f64);

        impl $crate::params::Parameter for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn value(&self) -> String {
                self.0.to_string()
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::params::Parameter::value(self))
            }
        }
    };
}

/// Declares a newtype over `bool` implementing [`Parameter`].
///
/// Booleans render as the literal strings `"true"` and `"false"`.
macro_rules! bool_parameter {
    ($(#[$meta:meta])* $name:ident, $key:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub bool);

        impl $crate::params::Parameter for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn value(&self) -> String {
                self.0.to_string()
            }
        }

        impl From<bool> for $name {
            fn from(value: bool) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::params::Parameter::value(self))
            }
        }
    };
}

/// Declares a newtype over `Vec<$element>` implementing [`Parameter`].
///
/// Elements render through their own string conversion and are joined with
/// `,` in input order; an empty vector renders as the empty string.
macro_rules! array_parameter {
    ($(#[$meta:meta])* $name:ident, $key:literal, $element:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub Vec<$element>);

        impl $crate::params::Parameter for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn value(&self) -> String {
                self.0
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            }
        }

        impl From<Vec<$element>> for $name {
            fn from(value: Vec<$element>) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::params::Parameter::value(self))
            }
        }
    };
}

pub(crate) use array_parameter;
pub(crate) use bool_parameter;
pub(crate) use double_parameter;
pub(crate) use int_parameter;
pub(crate) use string_parameter;

/// The flattened query parameter map sent to transport.
///
/// Ordered so that rendered requests are deterministic, which keeps signing
/// and test assertions stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap(BTreeMap<String, String>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter under its own key.
    pub fn insert(&mut self, parameter: &dyn Parameter) {
        self.0.insert(parameter.key().to_string(), parameter.value());
    }

    /// Inserts a parameter if one is present.
    pub fn insert_optional(&mut self, parameter: Option<&dyn Parameter>) {
        if let Some(parameter) = parameter {
            self.insert(parameter);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    int_parameter!(Limit, "limit");
    bool_parameter!(OpenNow, "open_now");
    string_parameter!(Term, "term");
    double_parameter!(Radius, "radius");
    array_parameter!(Categories, "categories", String);

    #[test]
    fn int_parameter_renders_decimal() {
        let limit = Limit(99);
        assert_eq!(limit.key(), "limit");
        assert_eq!(limit.value(), "99");
    }

    #[test]
    fn bool_parameter_renders_literals() {
        assert_eq!(OpenNow(true).value(), "true");
        assert_eq!(OpenNow(false).value(), "false");
    }

    #[test]
    fn double_parameter_renders_decimal() {
        assert_eq!(Radius(0.5).value(), "0.5");
        assert_eq!(Radius(40000.0).value(), "40000");
    }

    #[test]
    fn array_parameter_joins_in_order() {
        let categories = Categories(vec!["A".into(), "B".into()]);
        assert_eq!(categories.value(), "A,B");
    }

    #[test]
    fn empty_array_renders_empty_string() {
        assert_eq!(Categories(vec![]).value(), "");
    }

    #[test]
    fn rendering_is_deterministic() {
        let term = Term("food".into());
        assert_eq!(term.value(), term.value());
    }

    #[test]
    fn display_renders_value_not_pair() {
        assert_eq!(Limit(20).to_string(), "20");
        assert_eq!(Term("food".into()).to_string(), "food");
    }

    #[test]
    fn param_map_inserts_under_parameter_key() {
        let mut map = ParamMap::new();
        map.insert(&Term("food".into()));
        map.insert(&Limit(20));
        map.insert_optional(None);
        assert_eq!(map.get("term"), Some("food"));
        assert_eq!(map.get("limit"), Some("20"));
        assert_eq!(map.len(), 2);
    }
}
