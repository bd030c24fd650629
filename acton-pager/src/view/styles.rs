//! Bundled views rendered with Askama templates

use std::fmt;

use askama::Template;

use super::items::{build_items, PageItem};
use super::View;
use crate::error::Result;
use crate::options::PaginationOptions;
use crate::paginator::Pager;
use crate::route_generator::RouteGenerator;

#[derive(Template)]
#[template(path = "pagination/default.html")]
struct DefaultMarkup {
    items: Vec<PageItem>,
}

#[derive(Template)]
#[template(path = "pagination/semantic_ui.html")]
struct SemanticUiMarkup {
    items: Vec<PageItem>,
}

#[derive(Template)]
#[template(path = "pagination/twitter_bootstrap.html")]
struct TwitterBootstrapMarkup {
    items: Vec<PageItem>,
}

#[derive(Template)]
#[template(path = "pagination/twitter_bootstrap3.html")]
struct TwitterBootstrap3Markup {
    items: Vec<PageItem>,
}

#[derive(Template)]
#[template(path = "pagination/twitter_bootstrap4.html")]
struct TwitterBootstrap4Markup {
    items: Vec<PageItem>,
}

/// Markup flavor of a bundled view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewStyle {
    /// Plain `<nav>` with links and spans
    Default,
    /// Semantic UI pagination menu
    SemanticUi,
    /// Twitter Bootstrap 2
    TwitterBootstrap,
    /// Twitter Bootstrap 3
    TwitterBootstrap3,
    /// Twitter Bootstrap 4
    TwitterBootstrap4,
}

impl ViewStyle {
    /// Every bundled style
    pub const ALL: [ViewStyle; 5] = [
        ViewStyle::Default,
        ViewStyle::SemanticUi,
        ViewStyle::TwitterBootstrap,
        ViewStyle::TwitterBootstrap3,
        ViewStyle::TwitterBootstrap4,
    ];

    /// Name the style is registered under
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::SemanticUi => "semantic_ui",
            Self::TwitterBootstrap => "twitter_bootstrap",
            Self::TwitterBootstrap3 => "twitter_bootstrap3",
            Self::TwitterBootstrap4 => "twitter_bootstrap4",
        }
    }
}

impl fmt::Display for ViewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A [`View`] rendering one of the bundled templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateView {
    style: ViewStyle,
}

impl TemplateView {
    /// Create a view for `style`
    #[must_use]
    pub const fn new(style: ViewStyle) -> Self {
        Self { style }
    }

    /// The markup flavor
    #[must_use]
    pub const fn style(&self) -> ViewStyle {
        self.style
    }
}

impl View for TemplateView {
    fn render(
        &self,
        pager: &dyn Pager,
        route: &RouteGenerator<'_>,
        options: &PaginationOptions,
    ) -> Result<String> {
        let items = build_items(pager, route, options)?;

        let html = match self.style {
            ViewStyle::Default => DefaultMarkup { items }.render()?,
            ViewStyle::SemanticUi => SemanticUiMarkup { items }.render()?,
            ViewStyle::TwitterBootstrap => TwitterBootstrapMarkup { items }.render()?,
            ViewStyle::TwitterBootstrap3 => TwitterBootstrap3Markup { items }.render()?,
            ViewStyle::TwitterBootstrap4 => TwitterBootstrap4Markup { items }.render()?,
        };

        Ok(html)
    }
}
