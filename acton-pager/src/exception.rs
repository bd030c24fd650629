//! Exception listeners applied before an error becomes a response
//!
//! Listeners are ordered by priority, highest first, and each one may replace
//! the error it receives. The bundled
//! [`ConvertNotValidMaxPerPageToNotFound`] listener turns a pager rejecting its
//! page size into a plain "Page Not Found", so a tampered `?per_page=0` query
//! ends in a 404 instead of an internal error.
//!
//! ```rust
//! use acton_pager::exception::ExceptionDispatcher;
//! use acton_pager::paginator::PagerError;
//! use acton_pager::error::Error;
//!
//! let dispatcher = ExceptionDispatcher::with_defaults();
//! let error = dispatcher.dispatch(Error::Pager(PagerError::NotValidMaxPerPage(0)));
//! assert!(error.is_not_found());
//! ```

use std::sync::Arc;

use axum::response::{IntoResponse, Response};

use crate::error::Error;
use crate::paginator::PagerError;

/// Name of the event listeners subscribe to
pub const EXCEPTION_EVENT: &str = "kernel.exception";

/// Message of the not-found error substituted for an invalid page size
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page Not Found";

/// A listener notified when request handling fails
pub trait ExceptionListener: Send + Sync {
    /// Position in the listener chain, higher runs first
    fn priority(&self) -> i32 {
        0
    }

    /// Inspect the error and return it, or a replacement
    fn on_exception(&self, error: Error) -> Error;
}

/// Replaces [`PagerError::NotValidMaxPerPage`] with a "Page Not Found" error
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertNotValidMaxPerPageToNotFound;

impl ConvertNotValidMaxPerPageToNotFound {
    /// Priority the listener registers with
    pub const PRIORITY: i32 = 512;

    /// Apply the substitution, passing any other error through unchanged
    pub fn translate(error: Error) -> Error {
        match error {
            Error::Pager(err @ PagerError::NotValidMaxPerPage(_)) => {
                tracing::debug!(error = %err, "Converting invalid max per page to not found");
                Error::not_found_caused_by(PAGE_NOT_FOUND_MESSAGE, err)
            }
            other => other,
        }
    }
}

impl ExceptionListener for ConvertNotValidMaxPerPageToNotFound {
    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn on_exception(&self, error: Error) -> Error {
        Self::translate(error)
    }
}

/// Ordered chain of exception listeners
#[derive(Clone, Default)]
pub struct ExceptionDispatcher {
    listeners: Vec<Arc<dyn ExceptionListener>>,
}

impl ExceptionDispatcher {
    /// Create an empty dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the bundled listeners registered
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_listener(ConvertNotValidMaxPerPageToNotFound);
        dispatcher
    }

    /// Register a listener, keeping the chain sorted by descending priority.
    ///
    /// Listeners with equal priority run in registration order.
    pub fn add_listener(&mut self, listener: impl ExceptionListener + 'static) {
        self.listeners.push(Arc::new(listener));
        self.listeners
            .sort_by_key(|listener| std::cmp::Reverse(listener.priority()));
    }

    /// Number of registered listeners
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run the error through every listener in order
    pub fn dispatch(&self, error: Error) -> Error {
        self.listeners
            .iter()
            .fold(error, |error, listener| listener.on_exception(error))
    }

    /// Run the error through the listeners and turn the result into a response
    ///
    /// Handlers holding a dispatcher in their state call this from their error
    /// path so custom listeners apply to real requests:
    ///
    /// ```rust,ignore
    /// async fn list(State(dispatcher): State<ExceptionDispatcher>) -> Response {
    ///     match load_page() {
    ///         Ok(html) => Html(html).into_response(),
    ///         Err(err) => dispatcher.respond(err),
    ///     }
    /// }
    /// ```
    pub fn respond(&self, error: Error) -> Response {
        self.dispatch(error).into_response()
    }
}

impl std::fmt::Debug for ExceptionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionDispatcher")
            .field(
                "priorities",
                &self
                    .listeners
                    .iter()
                    .map(|listener| listener.priority())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        priority: i32,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ExceptionListener for Recording {
        fn priority(&self) -> i32 {
            self.priority
        }

        fn on_exception(&self, error: Error) -> Error {
            self.seen.lock().unwrap().push(self.name);
            error
        }
    }

    struct ReplaceWithArgument;

    impl ExceptionListener for ReplaceWithArgument {
        fn priority(&self) -> i32 {
            1024
        }

        fn on_exception(&self, _error: Error) -> Error {
            Error::InvalidArgument("replaced".to_string())
        }
    }

    #[test]
    fn test_invalid_max_per_page_becomes_not_found() {
        let error = ConvertNotValidMaxPerPageToNotFound
            .on_exception(Error::Pager(PagerError::NotValidMaxPerPage(0)));

        match &error {
            Error::NotFound { message, .. } => assert_eq!(message, PAGE_NOT_FOUND_MESSAGE),
            other => panic!("expected not found, got {other:?}"),
        }

        let cause = error
            .source()
            .and_then(|s| s.downcast_ref::<PagerError>())
            .cloned();
        assert_eq!(cause, Some(PagerError::NotValidMaxPerPage(0)));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let error = ConvertNotValidMaxPerPageToNotFound.on_exception(Error::Pager(
            PagerError::OutOfRangeCurrentPage {
                page: 12,
                nb_pages: 10,
            },
        ));
        assert!(matches!(
            error,
            Error::Pager(PagerError::OutOfRangeCurrentPage { page: 12, .. })
        ));

        let error = ConvertNotValidMaxPerPageToNotFound.on_exception(Error::UnsupportedContext);
        assert!(matches!(error, Error::UnsupportedContext));
    }

    #[test]
    fn test_listeners_run_by_descending_priority() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = ExceptionDispatcher::new();
        for (name, priority) in [("low", -10), ("high", 512), ("mid", 0), ("mid-late", 0)] {
            dispatcher.add_listener(Recording {
                name,
                priority,
                seen: Arc::clone(&seen),
            });
        }

        let _ = dispatcher.dispatch(Error::NoCurrentRequest);
        assert_eq!(*seen.lock().unwrap(), vec!["high", "mid", "mid-late", "low"]);
    }

    #[test]
    fn test_higher_priority_listener_can_preempt() {
        let mut dispatcher = ExceptionDispatcher::with_defaults();
        dispatcher.add_listener(ReplaceWithArgument);
        assert_eq!(dispatcher.len(), 2);

        let error = dispatcher.dispatch(Error::Pager(PagerError::NotValidMaxPerPage(0)));
        assert!(matches!(error, Error::InvalidArgument(_)));
    }

    struct HideMissingViews;

    impl ExceptionListener for HideMissingViews {
        fn on_exception(&self, error: Error) -> Error {
            match error {
                Error::ViewNotFound(_) => Error::not_found("No such listing"),
                other => other,
            }
        }
    }

    #[tokio::test]
    async fn test_respond_applies_custom_listeners() {
        use axum::{body::Body, extract::State, http::Request, http::StatusCode, routing::get, Router};
        use tower::ServiceExt;

        async fn list(State(dispatcher): State<ExceptionDispatcher>) -> Response {
            dispatcher.respond(Error::ViewNotFound("foundation".to_string()))
        }

        let mut dispatcher = ExceptionDispatcher::with_defaults();
        dispatcher.add_listener(HideMissingViews);
        let app = Router::new().route("/", get(list)).with_state(dispatcher);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "No such listing");
    }

    #[test]
    fn test_default_dispatcher() {
        let dispatcher = ExceptionDispatcher::with_defaults();
        assert!(!dispatcher.is_empty());
        assert!(dispatcher
            .dispatch(Error::Pager(PagerError::NotValidMaxPerPage(3)))
            .is_not_found());
    }
}
