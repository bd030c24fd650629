//! URL generation for named routes
//!
//! Page links are produced through the [`UrlGenerator`] trait so applications
//! can plug in their own router. [`RouteCollection`] is the bundled
//! implementation, working from axum-style route patterns.

mod collection;
mod query;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;

pub use collection::{Route, RouteCollection};
pub use query::{build_query, parse_query};

/// Generates URLs for named routes
pub trait UrlGenerator: Send + Sync {
    /// Generate the URL of route `name` with `params`.
    ///
    /// Parameters whose value is null must be left out of the URL.
    ///
    /// # Errors
    ///
    /// Fails when the route is unknown or a placeholder cannot be filled.
    fn generate(&self, name: &str, params: &Map<String, Value>) -> Result<String>;
}

impl<T: UrlGenerator + ?Sized> UrlGenerator for Arc<T> {
    fn generate(&self, name: &str, params: &Map<String, Value>) -> Result<String> {
        (**self).generate(name, params)
    }
}
