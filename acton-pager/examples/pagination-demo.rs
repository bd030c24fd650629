//! Pagination Demo
//!
//! Lists 100 items, ten per page, with the pagination rendered by the
//! configured view:
//!
//! - `/items?page=3` uses the route registered as `item_list`
//! - `/categories/{category}/items` keeps the category and the query string
//!   in every page link
//! - `/items?per_page=0` answers with a 404 "Page Not Found"
//!
//! ## Running
//!
//! ```bash
//! ACTON_PAGER_PAGINATION__DEFAULT_VIEW=twitter_bootstrap4 \
//!   cargo run --manifest-path=acton-pager/Cargo.toml --example pagination-demo
//! ```
//!
//! Then open http://localhost:8080/items in your browser.

use std::net::SocketAddr;

use acton_pager::prelude::*;
use askama::Template;

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html>
<head><title>{{ title }}</title></head>
<body>
<h1>{{ title }}</h1>
<ul>
{%- for item in items %}
<li>{{ item }}</li>
{%- endfor %}
</ul>
{{ pagination|safe }}
<p><a href="{{ last_page_url }}">Last page</a></p>
</body>
</html>"#
)]
struct ItemListPage {
    title: String,
    items: Vec<String>,
    pagination: String,
    last_page_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

fn item_pager(names: Vec<String>, query: &ListQuery) -> Result<FixedPager<String>> {
    let mut pager = FixedPager::new(names);
    pager.set_max_per_page(query.per_page.unwrap_or(10))?;
    pager.set_current_page(query.page.unwrap_or(1))?;
    Ok(pager)
}

fn render_page(
    runtime: &PagerRuntime,
    title: String,
    pager: &FixedPager<String>,
) -> Result<Html<String>> {
    let options = PaginationOptions::new();
    let page = ItemListPage {
        title,
        items: pager.current_page_results().to_vec(),
        pagination: runtime.render(pager, &options)?,
        last_page_url: runtime.page_url(pager, pager.nb_pages() as i64, &options)?,
    };
    Ok(Html(page.render()?))
}

async fn list_items(
    State(runtime): State<PagerRuntime>,
    requests: RequestStack,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let names = (1..=100).map(|n| format!("Item {n}")).collect();
    let pager = item_pager(names, &query)?;
    info!(page = pager.current_page(), "Listing items");

    render_page(&runtime.for_request(requests), "Items".to_string(), &pager)
}

async fn list_category_items(
    State(runtime): State<PagerRuntime>,
    requests: RequestStack,
    axum::extract::Path(category): axum::extract::Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let names = (1..=100)
        .map(|n| format!("{category} item {n}"))
        .collect();
    let pager = item_pager(names, &query)?;

    render_page(
        &runtime.for_request(requests),
        format!("Category: {category}"),
        &pager,
    )
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("pagination-demo")?;
    init_tracing(&config)?;

    let routes = RouteCollection::new()
        .with_route("item_list", "/items")
        .with_route("category_items", "/categories/{category}/items");
    let runtime = PagerRuntime::from_config(&config.pagination, routes);

    let app: Router = Router::new()
        .route(
            "/items",
            get(list_items).layer(Extension(RouteName::new("item_list"))),
        )
        .route(
            "/categories/{category}/items",
            get(list_category_items).layer(Extension(RouteName::new("category_items"))),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(runtime);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    info!("Pagination demo listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
