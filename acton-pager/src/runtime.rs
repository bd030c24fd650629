//! Template-facing pagination functions
//!
//! [`PagerRuntime`] is what templates call to render a pager or to get the
//! URL of a single page. It is built once at startup with the view registry
//! and the URL generator, then bound to each request with
//! [`PagerRuntime::for_request`]:
//!
//! ```rust,ignore
//! async fn list(
//!     State(runtime): State<PagerRuntime>,
//!     requests: RequestStack,
//! ) -> Result<Html<String>> {
//!     let runtime = runtime.for_request(requests);
//!     let pager = FixedPager::new(load_items());
//!     let html = runtime.render_named(&pager, "twitter_bootstrap4", &PaginationOptions::new())?;
//!     Ok(Html(html))
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::options::{type_name, PaginationOptions};
use crate::paginator::{Pager, PagerError};
use crate::request::RequestStack;
use crate::route_generator::RouteGenerator;
use crate::routing::{RouteCollection, UrlGenerator};
use crate::view::{ViewFactory, ViewStyle};

/// Renders pagers and page URLs for templates
#[derive(Clone)]
pub struct PagerRuntime {
    default_view: String,
    views: Arc<ViewFactory>,
    urls: Arc<dyn UrlGenerator>,
    requests: RequestStack,
    defaults: PaginationOptions,
}

impl PagerRuntime {
    /// Create a runtime with no current request
    pub fn new(
        default_view: impl Into<String>,
        views: impl Into<Arc<ViewFactory>>,
        urls: impl UrlGenerator + 'static,
    ) -> Self {
        Self {
            default_view: default_view.into(),
            views: views.into(),
            urls: Arc::new(urls),
            requests: RequestStack::new(),
            defaults: PaginationOptions::default(),
        }
    }

    /// Create a runtime with the bundled views, rendering `default` unless
    /// told otherwise
    pub fn with_defaults(urls: impl UrlGenerator + 'static) -> Self {
        Self::new(ViewStyle::Default.name(), ViewFactory::with_defaults(), urls)
    }

    /// Create a runtime from the `pagination` configuration section
    ///
    /// The configured `base_url` is applied to `routes`, and the configured
    /// page parameter, proximity and first-page handling become the default
    /// options. Options passed to a call win over them key by key.
    pub fn from_config(config: &PaginationConfig, routes: RouteCollection) -> Self {
        let routes = match &config.base_url {
            Some(base_url) => routes.with_base_url(base_url.clone()),
            None => routes,
        };

        tracing::debug!(
            default_view = %config.default_view,
            page_parameter = %config.page_parameter,
            "Configured pagination runtime"
        );

        Self::new(
            config.default_view.clone(),
            ViewFactory::with_defaults(),
            routes,
        )
        .with_options(config.default_options())
    }

    /// Replace the default options calls are layered over
    #[must_use]
    pub fn with_options(mut self, defaults: PaginationOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// A copy of this runtime bound to `requests`
    #[must_use]
    pub fn for_request(&self, requests: RequestStack) -> Self {
        Self {
            requests,
            ..self.clone()
        }
    }

    /// Name of the view used when none is given
    #[must_use]
    pub fn default_view(&self) -> &str {
        &self.default_view
    }

    /// Default options calls are layered over
    #[must_use]
    pub fn options(&self) -> &PaginationOptions {
        &self.defaults
    }

    /// The view registry
    #[must_use]
    pub fn views(&self) -> &ViewFactory {
        &self.views
    }

    /// Render `pager` with the default view.
    ///
    /// # Errors
    ///
    /// See [`PagerRuntime::render_named`].
    pub fn render(&self, pager: &dyn Pager, options: &PaginationOptions) -> Result<String> {
        self.render_named(pager, "", options)
    }

    /// Render `pager` with the view registered as `view_name`.
    ///
    /// An empty name selects the default view. Keys unset in `options` are
    /// taken from the runtime defaults.
    ///
    /// # Errors
    ///
    /// - [`Error::ViewNotFound`] for an unknown view
    /// - any route resolution error of [`RouteGenerator::build`]
    /// - any URL generation or template error raised while rendering
    pub fn render_named(
        &self,
        pager: &dyn Pager,
        view_name: &str,
        options: &PaginationOptions,
    ) -> Result<String> {
        let view_name = if view_name.is_empty() {
            self.default_view.as_str()
        } else {
            view_name
        };
        let view = self.views.get(view_name)?;
        let options = options.layered_over(&self.defaults);
        let route = RouteGenerator::build(&options, &self.requests, self.urls.as_ref())?;

        view.render(pager, &route, &options)
    }

    /// Render `pager` from loosely typed template arguments.
    ///
    /// `view_or_options` is the view name, `null` for the default view, or
    /// an object of options in which case `options` is ignored. Options are
    /// layered over the runtime defaults.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] naming the type when `view_or_options` is
    /// neither null, a string nor an object, or when `options` is not an
    /// object or null. Otherwise as [`PagerRuntime::render_named`].
    pub fn render_args(
        &self,
        pager: &dyn Pager,
        view_or_options: &Value,
        options: &Value,
    ) -> Result<String> {
        let (view_name, options) = match view_or_options {
            Value::Null => ("", options),
            Value::String(name) => (name.as_str(), options),
            Value::Object(_) => ("", view_or_options),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "The view name must be a string or null, {} given",
                    type_name(other)
                )))
            }
        };

        let options = match options {
            Value::Null => PaginationOptions::new(),
            Value::Object(_) => PaginationOptions::from_value(options.clone())?,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "The pagination options must be an object or null, {} given",
                    type_name(other)
                )))
            }
        };

        self.render_named(pager, view_name, &options)
    }

    /// URL of `page` of `pager`.
    ///
    /// # Errors
    ///
    /// [`Error::Pager`] with [`PagerError::OutOfRangeCurrentPage`] when `page`
    /// is negative or past the last page. Otherwise as
    /// [`PagerRuntime::route_generator`] and [`RouteGenerator::url`].
    pub fn page_url(
        &self,
        pager: &dyn Pager,
        page: i64,
        options: &PaginationOptions,
    ) -> Result<String> {
        let nb_pages = pager.nb_pages();
        let page = usize::try_from(page)
            .ok()
            .filter(|page| *page <= nb_pages)
            .ok_or(Error::Pager(PagerError::OutOfRangeCurrentPage { page, nb_pages }))?;

        self.route_generator(options)?.url(page)
    }

    /// Resolve the route page links point to for `options` layered over the
    /// runtime defaults.
    ///
    /// # Errors
    ///
    /// See [`RouteGenerator::build`].
    pub fn route_generator(&self, options: &PaginationOptions) -> Result<RouteGenerator<'_>> {
        RouteGenerator::build(
            &options.layered_over(&self.defaults),
            &self.requests,
            self.urls.as_ref(),
        )
    }
}

impl std::fmt::Debug for PagerRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerRuntime")
            .field("default_view", &self.default_view)
            .field("views", &self.views)
            .field("requests", &self.requests)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
