//! The grid page itself.

use axum::response::Html;

/// Serve the loan grid page.
///
/// A single static HTML file embedded at compile time: search box, sortable
/// column headers, and pager, all driven by `GET /api/v1/loans`. Serving it
/// from the same process keeps the browser on one origin and the deploy to
/// one binary.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
