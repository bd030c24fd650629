//! # acton-pager
//!
//! Pagination views and page URL generation for axum applications.
//!
//! ## Features
//!
//! - **Views**: `default`, `semantic_ui` and Twitter Bootstrap 2/3/4 markup rendered with Askama
//! - **Route inference**: page links reuse the current route, its path parameters and query string
//! - **Nested page parameters**: write the page to `filter[page]` or any other property path
//! - **Error translation**: an invalid per-page value becomes a 404 "Page Not Found"
//! - **Configuration**: Figment layering of defaults, TOML files and `ACTON_PAGER_` variables
//!
//! ## Example
//!
//! ```rust,no_run
//! use acton_pager::prelude::*;
//!
//! async fn list(
//!     State(runtime): State<PagerRuntime>,
//!     requests: RequestStack,
//!     Query(query): Query<ListQuery>,
//! ) -> Result<Html<String>> {
//!     let mut pager = FixedPager::new((1..=250).collect::<Vec<u32>>());
//!     // A per_page of 0 or below answers with a 404
//!     pager.set_max_per_page(query.per_page.unwrap_or(10))?;
//!     pager.set_current_page(query.page.unwrap_or(1))?;
//!
//!     let pagination = runtime
//!         .for_request(requests)
//!         .render(&pager, &PaginationOptions::new())?;
//!     Ok(Html(pagination))
//! }
//!
//! #[derive(Deserialize)]
//! struct ListQuery {
//!     page: Option<i64>,
//!     per_page: Option<i64>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let routes = RouteCollection::new().with_route("item_list", "/items");
//!     let runtime = PagerRuntime::from_config(&config.pagination, routes);
//!
//!     let app: Router = Router::new()
//!         .route(
//!             "/items",
//!             get(list).layer(Extension(RouteName::new("item_list"))),
//!         )
//!         .with_state(runtime);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod exception;
pub mod observability;
pub mod options;
pub mod paginator;
pub mod property_path;
pub mod request;
pub mod route_generator;
pub mod routing;
pub mod runtime;
pub mod view;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, PaginationConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::exception::{
        ConvertNotValidMaxPerPageToNotFound, ExceptionDispatcher, ExceptionListener,
    };
    pub use crate::observability::init_tracing;
    pub use crate::options::PaginationOptions;
    pub use crate::paginator::{FixedPager, Pager, PagerError};
    pub use crate::property_path::PropertyPath;
    pub use crate::request::{RequestContext, RequestStack, RouteName};
    pub use crate::route_generator::RouteGenerator;
    pub use crate::routing::{RouteCollection, UrlGenerator};
    pub use crate::runtime::PagerRuntime;
    pub use crate::view::{TemplateView, View, ViewFactory, ViewStyle};

    pub use axum::{
        extract::{Query, State},
        response::{Html, IntoResponse, Response},
        routing::get,
        Extension, Router,
    };

    pub use serde::{Deserialize, Serialize};

    // Re-export tracing macros and types
    pub use tracing::{debug, error, info, trace, warn};
}
