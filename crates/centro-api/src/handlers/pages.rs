//! Browser page handlers.

use axum::response::Html;

use centro_console::pages;

/// GET /
pub async fn home() -> Html<&'static str> {
    Html(pages::HOME_PAGE)
}

/// GET /about
pub async fn about() -> Html<&'static str> {
    Html(pages::ABOUT_PAGE)
}

/// GET /screener/calls
pub async fn call_center() -> Html<&'static str> {
    Html(pages::CALL_CENTER_PAGE)
}
