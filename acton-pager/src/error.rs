//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::exception::ConvertNotValidMaxPerPageToNotFound;
use crate::paginator::PagerError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by [`Error::NotFound`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Resource not found, optionally wrapping the error that caused it
    #[error("{message}")]
    NotFound {
        /// User-facing message
        message: String,
        /// Underlying error, kept for diagnostics only
        #[source]
        source: Option<BoxError>,
    },

    /// Pager configured with invalid values
    #[error("Pagination error: {0}")]
    Pager(#[source] PagerError),

    /// Argument of the wrong type passed to a template function
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Route inference attempted with an empty request stack
    #[error("There is no current request to infer the pagination route from")]
    NoCurrentRequest,

    /// Route inference attempted inside a sub-request
    #[error("The pagination route can not be inferred in a sub-request, pass `routeName` explicitly")]
    UnsupportedContext,

    /// The current request did not match a route
    #[error("The current request has no matched route, pass `routeName` explicitly")]
    RouteNotInferable,

    /// No view registered under the requested name
    #[error("Pagination view \"{0}\" is not registered")]
    ViewNotFound(String),

    /// No route registered under the requested name
    #[error("Route \"{0}\" does not exist")]
    RouteNotFound(String),

    /// A placeholder of the route pattern has no value
    #[error("Missing parameter \"{parameter}\" to generate a URL for route \"{route}\"")]
    MissingRouteParameter {
        /// Route name
        route: String,
        /// Placeholder without a value
        parameter: String,
    },

    /// A placeholder value is an object or an array
    #[error("Parameter \"{parameter}\" for route \"{route}\" must be a scalar value")]
    InvalidRouteParameter {
        /// Route name
        route: String,
        /// Offending placeholder
        parameter: String,
    },

    /// Malformed or unassignable property path
    #[error("Invalid property path \"{path}\": {reason}")]
    InvalidPropertyPath {
        /// The path expression
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl Error {
    /// Create a "not found" error without a cause
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: None,
        }
    }

    /// Create a "not found" error wrapping the error that caused it
    pub fn not_found_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::NotFound {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is surfaced to end users as a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Pager(_) => "PAGER_ERROR",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::NoCurrentRequest | Self::UnsupportedContext | Self::RouteNotInferable => {
                "ROUTE_INFERENCE_ERROR"
            }
            Self::ViewNotFound(_) => "VIEW_NOT_FOUND",
            Self::RouteNotFound(_)
            | Self::MissingRouteParameter { .. }
            | Self::InvalidRouteParameter { .. } => "URL_GENERATION_ERROR",
            Self::InvalidPropertyPath { .. } => "PROPERTY_PATH_ERROR",
            Self::Template(_) => "TEMPLATE_ERROR",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

/// Errors are run through [`ConvertNotValidMaxPerPageToNotFound`] first, so an
/// invalid page size answers 404 however the error was built. Other listeners
/// apply through [`ExceptionDispatcher::respond`](crate::exception::ExceptionDispatcher::respond).
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_response) = match ConvertNotValidMaxPerPageToNotFound::translate(self) {
            Error::NotFound { message, source } => {
                if let Some(cause) = source {
                    tracing::debug!(cause = %cause, "Responding with not found: {}", message);
                }
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_code(StatusCode::NOT_FOUND, "NOT_FOUND", message),
                )
            }

            other => {
                // Integration errors are fixed at template/config authoring time,
                // the detail stays in the logs
                tracing::error!(code = other.code(), "Pagination error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        other.code(),
                        "Internal server error",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Pager errors go through the not-found translation so that `?` in a handler
/// turns an invalid page size into a 404.
impl From<PagerError> for Error {
    fn from(err: PagerError) -> Self {
        ConvertNotValidMaxPerPageToNotFound::translate(Error::Pager(err))
    }
}
