//! Named routes and URL generation from route patterns

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::query::{build_query, scalar_to_string};
use super::UrlGenerator;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A route pattern in axum syntax, e.g. `/posts/{slug}` or `/files/{*path}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: String,
    segments: Vec<Segment>,
}

impl Route {
    /// Parse a route pattern.
    ///
    /// Text that is not a well-formed `{name}` placeholder is kept literally.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            let name = &after[..close];

            literal.push_str(&rest[..open]);
            let placeholder = match name.strip_prefix('*') {
                Some(catch_all) if !catch_all.is_empty() => {
                    Some(Segment::CatchAll(catch_all.to_string()))
                }
                None if !name.is_empty() && !name.contains('{') => {
                    Some(Segment::Param(name.to_string()))
                }
                _ => None,
            };

            match placeholder {
                Some(segment) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Static(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                None => literal.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Static(literal));
        }

        Self { pattern, segments }
    }

    /// The pattern as written
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Names of the placeholders in the pattern
    #[must_use]
    pub fn parameters(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .collect()
    }
}

/// Routes registered by name, used to generate URLs
///
/// Placeholders are filled from the parameters. Parameters the pattern does
/// not use are appended as the query string and null values are dropped.
///
/// ```rust
/// use acton_pager::routing::{RouteCollection, UrlGenerator};
/// use serde_json::json;
///
/// let routes = RouteCollection::new().with_route("post_comments", "/posts/{slug}/comments");
/// let params = json!({ "slug": "hello", "page": 2, "sort": null });
///
/// let url = routes.generate("post_comments", params.as_object().unwrap()).unwrap();
/// assert_eq!(url, "/posts/hello/comments?page=2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: HashMap<String, Route>,
    base_url: Option<String>,
}

impl RouteCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route, replacing any route with the same name
    pub fn add(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.routes.insert(name.into(), Route::new(pattern));
        self
    }

    /// Builder form of [`RouteCollection::add`]
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.add(name, pattern);
        self
    }

    /// Prefix generated URLs with a scheme and host, producing absolute URLs
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Look up a route by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl UrlGenerator for RouteCollection {
    fn generate(&self, name: &str, params: &Map<String, Value>) -> Result<String> {
        let route = self
            .routes
            .get(name)
            .ok_or_else(|| Error::RouteNotFound(name.to_string()))?;

        let mut remaining = params.clone();
        let mut url = self.base_url.clone().unwrap_or_default();

        for segment in &route.segments {
            let (parameter, catch_all) = match segment {
                Segment::Static(text) => {
                    url.push_str(text);
                    continue;
                }
                Segment::Param(parameter) => (parameter, false),
                Segment::CatchAll(parameter) => (parameter, true),
            };

            let value = remaining
                .remove(parameter)
                .filter(|value| !value.is_null())
                .ok_or_else(|| Error::MissingRouteParameter {
                    route: name.to_string(),
                    parameter: parameter.clone(),
                })?;
            let raw = scalar_to_string(&value).ok_or_else(|| Error::InvalidRouteParameter {
                route: name.to_string(),
                parameter: parameter.clone(),
            })?;

            if catch_all {
                let encoded = raw
                    .split('/')
                    .map(|part| urlencoding::encode(part).into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                url.push_str(&encoded);
            } else {
                url.push_str(&urlencoding::encode(&raw));
            }
        }

        let query = build_query(&remaining);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        tracing::trace!(route = name, url = %url, "Generated URL");
        Ok(url)
    }
}
