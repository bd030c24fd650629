//! Link sequence shared by every pagination view

use crate::error::Result;
use crate::options::PaginationOptions;
use crate::paginator::Pager;
use crate::route_generator::RouteGenerator;

/// What a [`PageItem`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A link to another page
    Link,
    /// The current page
    Current,
    /// A previous/next control with nowhere to go
    Disabled,
    /// A gap between page ranges
    Dots,
}

/// One entry of the rendered pagination
///
/// Fields hold plain text; templates escape them. A gap with an empty
/// `label` renders the view's own gap marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    /// Kind of entry
    pub kind: ItemKind,
    /// Page the entry refers to, if any
    pub page: Option<usize>,
    /// Text shown for the entry
    pub label: String,
    /// Link target, empty unless `kind` is [`ItemKind::Link`]
    pub href: String,
    /// `rel` attribute of the link, empty when none applies
    pub rel: &'static str,
}

impl PageItem {
    fn link(page: usize, label: String, href: String, rel: &'static str) -> Self {
        Self {
            kind: ItemKind::Link,
            page: Some(page),
            label,
            href,
            rel,
        }
    }

    fn current(page: usize) -> Self {
        Self {
            kind: ItemKind::Current,
            page: Some(page),
            label: page.to_string(),
            href: String::new(),
            rel: "",
        }
    }

    fn disabled(label: String) -> Self {
        Self {
            kind: ItemKind::Disabled,
            page: None,
            label,
            href: String::new(),
            rel: "",
        }
    }

    fn dots(label: String) -> Self {
        Self {
            kind: ItemKind::Dots,
            page: None,
            label,
            href: String::new(),
            rel: "",
        }
    }

    /// Whether the entry links to another page
    pub fn is_link(&self) -> bool {
        self.kind == ItemKind::Link
    }

    /// Whether the entry is the current page
    pub fn is_current(&self) -> bool {
        self.kind == ItemKind::Current
    }

    /// Whether the entry is a disabled previous/next control
    pub fn is_disabled(&self) -> bool {
        self.kind == ItemKind::Disabled
    }

    /// Whether the entry is a gap
    pub fn is_dots(&self) -> bool {
        self.kind == ItemKind::Dots
    }
}

/// Build the link sequence for `pager`.
///
/// The sequence is: previous, first page, a gap or the second page, the
/// `proximity` pages around the current one, a gap or the second-to-last
/// page, last page, next. The window keeps `2 * proximity + 1` pages when
/// the pager has that many, sliding away from either end.
///
/// Gaps carry the `dots_message` option, or an empty label when it is unset.
pub fn build_items(
    pager: &dyn Pager,
    route: &RouteGenerator<'_>,
    options: &PaginationOptions,
) -> Result<Vec<PageItem>> {
    let nb_pages = pager.nb_pages();
    let current = pager.current_page();
    let proximity = options.proximity();
    let dots_label = options.dots_message().unwrap_or_default();
    let page_link = |page: usize| -> Result<PageItem> {
        Ok(PageItem::link(page, page.to_string(), route.url(page)?, ""))
    };

    let mut items = Vec::new();

    let prev_label = options.prev_message().to_string();
    match pager.previous_page() {
        Some(page) => items.push(PageItem::link(page, prev_label, route.url(page)?, "prev")),
        None => items.push(PageItem::disabled(prev_label)),
    }

    let (start, end) = window(current, nb_pages, proximity);

    if start > 1 {
        items.push(page_link(1)?);
        if start == 3 {
            items.push(page_link(2)?);
        } else if start > 3 {
            items.push(PageItem::dots(dots_label.to_string()));
        }
    }

    for page in start..=end {
        if page == current {
            items.push(PageItem::current(page));
        } else {
            items.push(page_link(page)?);
        }
    }

    if end < nb_pages {
        if end + 2 < nb_pages {
            items.push(PageItem::dots(dots_label.to_string()));
        } else if end + 2 == nb_pages {
            items.push(page_link(nb_pages - 1)?);
        }
        items.push(page_link(nb_pages)?);
    }

    let next_label = options.next_message().to_string();
    match pager.next_page() {
        Some(page) => items.push(PageItem::link(page, next_label, route.url(page)?, "next")),
        None => items.push(PageItem::disabled(next_label)),
    }

    Ok(items)
}

/// First and last page of the window around `current`
fn window(current: usize, nb_pages: usize, proximity: usize) -> (usize, usize) {
    let (mut start, mut end) = if current > proximity {
        (current - proximity, current + proximity)
    } else {
        (1, (2 * proximity + 1).min(nb_pages))
    };

    if end > nb_pages {
        start = start.saturating_sub(end - nb_pages).max(1);
        end = nb_pages;
    }

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginator::FixedPager;
    use crate::request::{RequestContext, RequestStack};
    use crate::routing::RouteCollection;

    fn pager(current: i64) -> FixedPager<u32> {
        let mut pager = FixedPager::new((1..=100).collect());
        pager.set_current_page(current).unwrap();
        pager
    }

    fn describe(items: &[PageItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item.kind {
                ItemKind::Link => format!("{}->{}", item.label, item.href),
                ItemKind::Current => format!("[{}]", item.label),
                ItemKind::Disabled => format!("({})", item.label),
                ItemKind::Dots if item.label.is_empty() => "...".to_string(),
                ItemKind::Dots => format!("...{}", item.label),
            })
            .collect()
    }

    fn items_for(current: i64, options: &PaginationOptions) -> Vec<PageItem> {
        let routes = RouteCollection::new().with_route("view", "/view");
        let requests = RequestStack::from(RequestContext::new().with_route("view"));
        let route = RouteGenerator::build(options, &requests, &routes).unwrap();
        build_items(&pager(current), &route, options).unwrap()
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(window(1, 10, 2), (1, 5));
        assert_eq!(window(2, 10, 2), (1, 5));
        assert_eq!(window(3, 10, 2), (1, 5));
        assert_eq!(window(5, 10, 2), (3, 7));
        assert_eq!(window(9, 10, 2), (6, 10));
        assert_eq!(window(10, 10, 2), (6, 10));
        assert_eq!(window(1, 3, 2), (1, 3));
        assert_eq!(window(1, 1, 2), (1, 1));
        assert_eq!(window(4, 10, 0), (4, 4));
    }

    #[test]
    fn test_first_page() {
        let items = items_for(1, &PaginationOptions::default());
        assert_eq!(
            describe(&items),
            vec![
                "(Previous)",
                "[1]",
                "2->/view?page=2",
                "3->/view?page=3",
                "4->/view?page=4",
                "5->/view?page=5",
                "...",
                "10->/view?page=10",
                "Next->/view?page=2",
            ]
        );
        assert_eq!(items.last().map(|item| item.rel), Some("next"));
    }

    #[test]
    fn test_middle_page_with_first_page_omitted() {
        let options = PaginationOptions::default().with_omit_first_page(true);
        let items = items_for(5, &options);
        assert_eq!(
            describe(&items),
            vec![
                "Previous->/view?page=4",
                "1->/view",
                "2->/view?page=2",
                "3->/view?page=3",
                "4->/view?page=4",
                "[5]",
                "6->/view?page=6",
                "7->/view?page=7",
                "...",
                "10->/view?page=10",
                "Next->/view?page=6",
            ]
        );
        assert_eq!(items[0].rel, "prev");
    }

    #[test]
    fn test_second_to_last_page_instead_of_gap() {
        let items = items_for(6, &PaginationOptions::default());
        let described = describe(&items);
        assert_eq!(described[described.len() - 3], "9->/view?page=9");
        assert_eq!(described[2], "...");
        assert_eq!(described.iter().filter(|item| *item == "...").count(), 1);
    }

    #[test]
    fn test_last_page() {
        let items = items_for(10, &PaginationOptions::default());
        assert_eq!(
            describe(&items),
            vec![
                "Previous->/view?page=9",
                "1->/view?page=1",
                "...",
                "6->/view?page=6",
                "7->/view?page=7",
                "8->/view?page=8",
                "9->/view?page=9",
                "[10]",
                "(Next)",
            ]
        );
    }

    #[test]
    fn test_labels_stay_plain_text() {
        let options = PaginationOptions::default()
            .with_option("prev_message", "<< Back")
            .with_option("dots_message", "~");
        let items = items_for(1, &options);
        assert_eq!(items[0].label, "<< Back");
        assert!(describe(&items).contains(&"...~".to_string()));
    }
}
