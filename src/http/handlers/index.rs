use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Upload form with the status polling script
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
