//! Pagination views and the registry they are looked up in
//!
//! A view turns a pager and a [`RouteGenerator`] into markup. Views are
//! registered by name in a [`ViewFactory`];
//! [`ViewFactory::with_defaults`] registers the bundled styles:
//!
//! | Name                 | Markup                               |
//! |----------------------|--------------------------------------|
//! | `default`            | `<nav>` with links and spans         |
//! | `semantic_ui`        | Semantic UI `ui pagination menu`     |
//! | `twitter_bootstrap`  | Bootstrap 2 `div.pagination > ul`    |
//! | `twitter_bootstrap3` | Bootstrap 3 `ul.pagination`          |
//! | `twitter_bootstrap4` | Bootstrap 4 `page-item`/`page-link`  |
//!
//! Custom views implement [`View`]:
//!
//! ```rust
//! use acton_pager::prelude::*;
//!
//! struct Summary;
//!
//! impl View for Summary {
//!     fn render(
//!         &self,
//!         pager: &dyn Pager,
//!         route: &RouteGenerator<'_>,
//!         _options: &PaginationOptions,
//!     ) -> Result<String> {
//!         Ok(format!(
//!             r#"<a href="{}">page {} of {}</a>"#,
//!             route.url(pager.current_page())?,
//!             pager.current_page(),
//!             pager.nb_pages()
//!         ))
//!     }
//! }
//!
//! let mut views = ViewFactory::with_defaults();
//! views.set("summary", Summary);
//! assert!(views.has("summary"));
//! ```

mod items;
mod styles;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::options::PaginationOptions;
use crate::paginator::Pager;
use crate::route_generator::RouteGenerator;

pub use items::{build_items, ItemKind, PageItem};
pub use styles::{TemplateView, ViewStyle};

/// Renders a pager into markup
pub trait View: Send + Sync {
    /// Render `pager`, linking pages through `route`.
    ///
    /// # Errors
    ///
    /// Fails when a page URL cannot be generated or the markup cannot be
    /// rendered.
    fn render(
        &self,
        pager: &dyn Pager,
        route: &RouteGenerator<'_>,
        options: &PaginationOptions,
    ) -> Result<String>;
}

/// Views registered by name
#[derive(Clone, Default)]
pub struct ViewFactory {
    views: HashMap<String, Arc<dyn View>>,
}

impl ViewFactory {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every bundled view
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        for style in ViewStyle::ALL {
            factory.set(style.name(), TemplateView::new(style));
        }
        factory
    }

    /// Register a view, replacing any view with the same name
    pub fn set(&mut self, name: impl Into<String>, view: impl View + 'static) -> &mut Self {
        self.views.insert(name.into(), Arc::new(view));
        self
    }

    /// Look up a view by exact name
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewNotFound`] when no view is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn View>> {
        self.views
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ViewNotFound(name.to_string()))
    }

    /// Whether a view is registered under `name`
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Remove a view
    pub fn remove(&mut self, name: &str) -> bool {
        self.views.remove(name).is_some()
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFactory")
            .field("views", &self.names())
            .finish()
    }
}
