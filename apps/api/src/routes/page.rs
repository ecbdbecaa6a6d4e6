use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The interactive page: résumé upload or manual skills entry, and the results list.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
