//! Request context used to infer the pagination route
//!
//! When no `routeName` option is given, page links point back at the route
//! that handled the current request, keeping its path and query parameters.
//! [`RequestContext`] is the snapshot of that route and [`RequestStack`] the
//! chain of requests being handled, innermost last.
//!
//! Both are axum extractors:
//!
//! ```rust,ignore
//! use acton_pager::request::{RequestStack, RouteName};
//! use axum::{routing::get, Extension, Router};
//!
//! async fn list_posts(requests: RequestStack) -> String {
//!     // hand `requests` to a PagerRuntime
//!     # String::new()
//! }
//!
//! let app: Router = Router::new().route(
//!     "/posts",
//!     get(list_posts).layer(Extension(RouteName::new("post_list"))),
//! );
//! ```
//!
//! The route name comes from the [`RouteName`] extension when present and
//! falls back to the matched path (`/posts/{slug}`), so routes can also be
//! registered in a [`RouteCollection`](crate::routing::RouteCollection) under
//! their pattern.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, MatchedPath, RawPathParams};
use http::request::Parts;
use serde_json::{Map, Value};

use crate::routing::parse_query;

/// Name of the route that handled a request, set as a request extension
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteName(pub String);

impl RouteName {
    /// Create a route name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only snapshot of a request's route and query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Name of the matched route
    pub route_name: Option<String>,

    /// Parameters captured by the route pattern
    pub route_params: Map<String, Value>,

    /// Query string parameters
    pub query: Map<String, Value>,
}

impl RequestContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the matched route name
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }

    /// Add a route parameter
    #[must_use]
    pub fn with_route_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.route_params.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Replace the query parameters with those of a raw query string
    #[must_use]
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query = parse_query(query);
        self
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let route_name = parts
            .extensions
            .get::<RouteName>()
            .map(|name| name.0.clone())
            .or_else(|| {
                parts
                    .extensions
                    .get::<MatchedPath>()
                    .map(|path| path.as_str().to_string())
            });

        // Requests outside a matched route have no path parameters
        let route_params = match RawPathParams::from_request_parts(parts, state).await {
            Ok(raw) => raw
                .iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
            Err(_) => Map::new(),
        };

        let query = parts.uri.query().map(parse_query).unwrap_or_default();

        Ok(Self {
            route_name,
            route_params,
            query,
        })
    }
}

/// Requests being handled, innermost last
///
/// A stack deeper than one means the innermost request is a sub-request of
/// the one below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStack {
    requests: Vec<RequestContext>,
}

impl RequestStack {
    /// Create an empty stack
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a request on top of the stack
    pub fn push(&mut self, request: RequestContext) {
        self.requests.push(request);
    }

    /// Pop the innermost request
    pub fn pop(&mut self) -> Option<RequestContext> {
        self.requests.pop()
    }

    /// The innermost request
    #[must_use]
    pub fn current(&self) -> Option<&RequestContext> {
        self.requests.last()
    }

    /// The request the innermost one was issued from
    #[must_use]
    pub fn parent(&self) -> Option<&RequestContext> {
        self.requests
            .len()
            .checked_sub(2)
            .and_then(|index| self.requests.get(index))
    }

    /// The outermost request
    #[must_use]
    pub fn main(&self) -> Option<&RequestContext> {
        self.requests.first()
    }

    /// Number of requests on the stack
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the stack is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl From<RequestContext> for RequestStack {
    fn from(request: RequestContext) -> Self {
        Self {
            requests: vec![request],
        }
    }
}

impl<S> FromRequestParts<S> for RequestStack
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let request = RequestContext::from_request_parts(parts, state).await?;
        Ok(request.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Extension, Router};
    use serde_json::json;
    use tower::ServiceExt;

    async fn echo(request: RequestContext) -> String {
        serde_json::to_string(&json!({
            "route": request.route_name,
            "params": request.route_params,
            "query": request.query,
        }))
        .unwrap()
    }

    async fn call(app: Router, uri: &str) -> Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_stack_current_and_parent() {
        let mut stack = RequestStack::new();
        assert!(stack.current().is_none());
        assert!(stack.parent().is_none());

        stack.push(RequestContext::new().with_route("main"));
        assert_eq!(stack.current().and_then(|r| r.route_name.as_deref()), Some("main"));
        assert!(stack.parent().is_none());

        stack.push(RequestContext::new().with_route("fragment"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.current().and_then(|r| r.route_name.as_deref()), Some("fragment"));
        assert_eq!(stack.parent().and_then(|r| r.route_name.as_deref()), Some("main"));
        assert_eq!(stack.main().and_then(|r| r.route_name.as_deref()), Some("main"));

        stack.pop();
        assert!(stack.parent().is_none());
        assert!(!stack.is_empty());
    }

    #[test]
    fn test_context_builder() {
        let request = RequestContext::new()
            .with_route("posts")
            .with_route_param("slug", "hello")
            .with_query_param("sort", "name");

        assert_eq!(request.route_name.as_deref(), Some("posts"));
        assert_eq!(request.route_params.get("slug"), Some(&json!("hello")));
        assert_eq!(request.query.get("sort"), Some(&json!("name")));

        let request = request.with_query_string("page=3&filter[status]=open");
        assert_eq!(
            Value::Object(request.query),
            json!({ "page": "3", "filter": { "status": "open" } })
        );
    }

    #[tokio::test]
    async fn test_extractor_uses_matched_path() {
        let app = Router::new().route("/posts/{slug}", get(echo));
        let body = call(app, "/posts/hello?sort=name&filter%5Bpage%5D=2").await;

        assert_eq!(
            body,
            json!({
                "route": "/posts/{slug}",
                "params": { "slug": "hello" },
                "query": { "sort": "name", "filter": { "page": "2" } },
            })
        );
    }

    #[tokio::test]
    async fn test_extractor_prefers_route_name_extension() {
        let app = Router::new().route(
            "/posts",
            get(echo).layer(Extension(RouteName::new("post_list"))),
        );
        let body = call(app, "/posts").await;

        assert_eq!(body["route"], json!("post_list"));
        assert_eq!(body["params"], json!({}));
        assert_eq!(body["query"], json!({}));
    }

    #[tokio::test]
    async fn test_stack_extractor_holds_single_request() {
        async fn depth(requests: RequestStack) -> String {
            format!("{}:{}", requests.len(), requests.parent().is_some())
        }

        let app = Router::new().route("/", get(depth));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"1:false");
    }
}
