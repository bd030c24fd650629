//! Page number to URL mapping used by the views
//!
//! A [`RouteGenerator`] is resolved once per render from the pagination
//! options and the current request, then called for every page link.
//!
//! Without a `routeName` option the route is inferred from the current
//! request. Parameters are then layered, later layers winning on key
//! collisions: query string, route parameters, `routeParams` option.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::options::PaginationOptions;
use crate::property_path::PropertyPath;
use crate::request::RequestStack;
use crate::routing::UrlGenerator;

/// Generates the URL of each page for one render
pub struct RouteGenerator<'a> {
    urls: &'a dyn UrlGenerator,
    route_name: String,
    route_params: Map<String, Value>,
    page_path: PropertyPath,
    omit_first_page: bool,
}

impl<'a> RouteGenerator<'a> {
    /// Resolve the route and its parameters.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPropertyPath`] if `pageParameter` cannot be parsed
    /// - [`Error::NoCurrentRequest`] if the route must be inferred and the
    ///   stack is empty
    /// - [`Error::UnsupportedContext`] if the route must be inferred inside a
    ///   sub-request
    /// - [`Error::RouteNotInferable`] if the current request matched no route
    pub fn build(
        options: &PaginationOptions,
        requests: &RequestStack,
        urls: &'a dyn UrlGenerator,
    ) -> Result<Self> {
        let page_path = PropertyPath::parse(options.page_parameter())?;

        let (route_name, route_params) = match &options.route_name {
            Some(name) => (name.clone(), options.route_params.clone()),
            None => infer_route(options, requests)?,
        };

        Ok(Self {
            urls,
            route_name,
            route_params,
            page_path,
            omit_first_page: options.omit_first_page(),
        })
    }

    /// URL of `page`.
    ///
    /// With `omitFirstPage`, page 1 and below are linked without the page
    /// parameter.
    ///
    /// # Errors
    ///
    /// Fails when the page path runs through a scalar parameter or the URL
    /// generator rejects the route.
    pub fn url(&self, page: usize) -> Result<String> {
        let mut params = self.route_params.clone();
        let value = if self.omit_first_page && page <= 1 {
            Value::Null
        } else {
            Value::from(page)
        };
        self.page_path.set_value(&mut params, value)?;

        self.urls.generate(&self.route_name, &params)
    }

    /// Resolved route name
    #[must_use]
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Resolved route parameters, before the page is written
    #[must_use]
    pub fn route_params(&self) -> &Map<String, Value> {
        &self.route_params
    }
}

fn infer_route(
    options: &PaginationOptions,
    requests: &RequestStack,
) -> Result<(String, Map<String, Value>)> {
    let request = requests.current().ok_or(Error::NoCurrentRequest)?;

    if requests.parent().is_some() {
        return Err(Error::UnsupportedContext);
    }

    let route_name = request
        .route_name
        .clone()
        .ok_or(Error::RouteNotInferable)?;

    let mut params = request.query.clone();
    params.extend(request.route_params.clone());
    params.extend(options.route_params.clone());

    tracing::debug!(route = %route_name, "Inferred pagination route from the current request");

    Ok((route_name, params))
}

impl std::fmt::Debug for RouteGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGenerator")
            .field("route_name", &self.route_name)
            .field("route_params", &self.route_params)
            .field("page_path", &self.page_path)
            .field("omit_first_page", &self.omit_first_page)
            .finish_non_exhaustive()
    }
}
