use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../assets/landing.html");

/// GET / - static page explaining that the primary application is down
pub async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
