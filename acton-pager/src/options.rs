//! Options accepted by the pagination template functions
//!
//! Four keys drive URL generation (`routeName`, `routeParams`,
//! `pageParameter`, `omitFirstPage`). Every other key is kept in
//! [`PaginationOptions::extra`] and handed to the view untouched, which is
//! where labels such as `prev_message` live.
//!
//! Unset keys stay unset, so options passed to a call can be layered over
//! configured defaults with [`PaginationOptions::layered_over`].
//!
//! ```rust
//! use acton_pager::options::PaginationOptions;
//! use serde_json::json;
//!
//! let options = PaginationOptions::from_value(json!({
//!     "routeName": "post_list",
//!     "omitFirstPage": true,
//!     "prev_message": "Newer",
//! }))
//! .unwrap();
//!
//! assert_eq!(options.route_name.as_deref(), Some("post_list"));
//! assert_eq!(options.page_parameter(), "[page]");
//! assert_eq!(options.prev_message(), "Newer");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Default property path the page number is written to
pub const DEFAULT_PAGE_PARAMETER: &str = "[page]";

/// Default number of pages shown on each side of the current one
pub const DEFAULT_PROXIMITY: usize = 2;

/// Default label of the link to the previous page
pub const DEFAULT_PREV_MESSAGE: &str = "Previous";

/// Default label of the link to the next page
pub const DEFAULT_NEXT_MESSAGE: &str = "Next";

/// Options for rendering a pager and generating its page URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    /// Route page links point to. `None` reuses the current request's route.
    #[serde(default)]
    pub route_name: Option<String>,

    /// Parameters for the route, layered over those of the current request
    /// when the route is inferred
    #[serde(default)]
    pub route_params: Map<String, Value>,

    /// Property path within the route parameters receiving the page number,
    /// `[page]` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_parameter: Option<String>,

    /// Link page 1 without a page parameter, off when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_first_page: Option<bool>,

    /// View-specific options, passed through to the view
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaginationOptions {
    /// Create options with every default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a JSON object as passed from a template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the value is not an object or a
    /// known key has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidArgument(format!(
                "pagination options must be an object, {} given",
                type_name(&value)
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::InvalidArgument(format!("invalid pagination options: {e}")))
    }

    /// These options with every unset key taken from `defaults`.
    ///
    /// Route parameters and view options are merged key by key, these
    /// options winning on collisions.
    #[must_use]
    pub fn layered_over(&self, defaults: &PaginationOptions) -> Self {
        let mut route_params = defaults.route_params.clone();
        route_params.extend(self.route_params.clone());
        let mut extra = defaults.extra.clone();
        extra.extend(self.extra.clone());

        Self {
            route_name: self.route_name.clone().or_else(|| defaults.route_name.clone()),
            route_params,
            page_parameter: self
                .page_parameter
                .clone()
                .or_else(|| defaults.page_parameter.clone()),
            omit_first_page: self.omit_first_page.or(defaults.omit_first_page),
            extra,
        }
    }

    /// Property path receiving the page number
    #[must_use]
    pub fn page_parameter(&self) -> &str {
        self.page_parameter
            .as_deref()
            .unwrap_or(DEFAULT_PAGE_PARAMETER)
    }

    /// Whether page 1 is linked without a page parameter
    #[must_use]
    pub fn omit_first_page(&self) -> bool {
        self.omit_first_page.unwrap_or(false)
    }

    /// Set the route page links point to
    #[must_use]
    pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }

    /// Add a route parameter
    #[must_use]
    pub fn with_route_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.route_params.insert(key.into(), value.into());
        self
    }

    /// Set the property path receiving the page number
    #[must_use]
    pub fn with_page_parameter(mut self, path: impl Into<String>) -> Self {
        self.page_parameter = Some(path.into());
        self
    }

    /// Link page 1 without a page parameter
    #[must_use]
    pub fn with_omit_first_page(mut self, omit: bool) -> Self {
        self.omit_first_page = Some(omit);
        self
    }

    /// Add a view-specific option
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// A view-specific option
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    fn string_option(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Label of the link to the previous page
    #[must_use]
    pub fn prev_message(&self) -> &str {
        self.string_option("prev_message")
            .unwrap_or(DEFAULT_PREV_MESSAGE)
    }

    /// Label of the link to the next page
    #[must_use]
    pub fn next_message(&self) -> &str {
        self.string_option("next_message")
            .unwrap_or(DEFAULT_NEXT_MESSAGE)
    }

    /// Label of the gap between page ranges, if overridden
    #[must_use]
    pub fn dots_message(&self) -> Option<&str> {
        self.string_option("dots_message")
    }

    /// Pages shown on each side of the current one
    #[must_use]
    pub fn proximity(&self) -> usize {
        self.extra
            .get("proximity")
            .and_then(Value::as_u64)
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or(DEFAULT_PROXIMITY)
    }
}

/// Name of a JSON value's type, as reported in argument errors
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = PaginationOptions::default();
        assert_eq!(options.route_name, None);
        assert!(options.route_params.is_empty());
        assert_eq!(options.page_parameter(), DEFAULT_PAGE_PARAMETER);
        assert!(!options.omit_first_page());
        assert_eq!(options.prev_message(), "Previous");
        assert_eq!(options.next_message(), "Next");
        assert_eq!(options.dots_message(), None);
        assert_eq!(options.proximity(), DEFAULT_PROXIMITY);
    }

    #[test]
    fn test_from_value_keeps_unknown_keys() {
        let options = PaginationOptions::from_value(json!({
            "routeParams": { "slug": "hello" },
            "pageParameter": "filter[page]",
            "proximity": 3,
            "css_class": "pager",
        }))
        .unwrap();

        assert_eq!(options.route_params.get("slug"), Some(&json!("hello")));
        assert_eq!(options.page_parameter(), "filter[page]");
        assert_eq!(options.omit_first_page, None);
        assert_eq!(options.proximity(), 3);
        assert_eq!(options.option("css_class"), Some(&json!("pager")));
        assert!(options.option("routeParams").is_none());
    }

    #[test]
    fn test_from_value_null_route_name() {
        let options = PaginationOptions::from_value(json!({ "routeName": null })).unwrap();
        assert_eq!(options.route_name, None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = PaginationOptions::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));

        let err = PaginationOptions::from_value(json!({ "omitFirstPage": "yes" })).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_layered_over_explicit_keys_win() {
        let defaults = PaginationOptions::new()
            .with_omit_first_page(true)
            .with_page_parameter("[p]")
            .with_route_param("sort", "name")
            .with_option("proximity", 4)
            .with_option("prev_message", "Back");
        let options = PaginationOptions::from_value(json!({
            "omitFirstPage": false,
            "routeParams": { "sort": "date", "q": "rust" },
            "prev_message": "Newer",
        }))
        .unwrap();

        let layered = options.layered_over(&defaults);

        assert!(!layered.omit_first_page());
        assert_eq!(layered.page_parameter(), "[p]");
        assert_eq!(
            Value::Object(layered.route_params.clone()),
            json!({ "sort": "date", "q": "rust" })
        );
        assert_eq!(layered.proximity(), 4);
        assert_eq!(layered.prev_message(), "Newer");
        assert_eq!(layered.route_name, None);
    }

    #[test]
    fn test_layered_over_unset_keys_fall_back() {
        let defaults = PaginationOptions::new()
            .with_omit_first_page(true)
            .with_page_parameter("[p]");

        let layered = PaginationOptions::new().layered_over(&defaults);
        assert_eq!(layered, defaults);

        let layered = PaginationOptions::new().layered_over(&PaginationOptions::new());
        assert_eq!(layered.page_parameter(), DEFAULT_PAGE_PARAMETER);
        assert!(!layered.omit_first_page());
    }

    #[test]
    fn test_builders() {
        let options = PaginationOptions::new()
            .with_route_name("posts")
            .with_route_param("sort", "name")
            .with_page_parameter("[p]")
            .with_option("next_message", "Older");

        assert_eq!(options.route_name.as_deref(), Some("posts"));
        assert_eq!(options.route_params.get("sort"), Some(&json!("name")));
        assert_eq!(options.page_parameter(), "[p]");
        assert_eq!(options.next_message(), "Older");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!(3)), "integer");
        assert_eq!(type_name(&json!(1.5)), "double");
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!("x")), "string");
    }
}
