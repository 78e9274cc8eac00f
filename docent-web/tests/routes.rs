//! Router tests: visitor pages, admin flow and JSON API

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use docent_core::{Catalog, DocentConfig};
use docent_web::{AppState, build_router};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(DocentConfig::for_testing(), Catalog::builtin()).unwrap();
    build_router(state)
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, form: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn signed_in_cookie(app: &Router) -> String {
    let response = post_form(
        app,
        "/auth",
        "email=curator%40museum.test&password=correct+horse",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_home_and_scan_pages_render() {
    let app = app();

    let home = get(&app, "/", None).await;
    assert_eq!(home.status(), StatusCode::OK);
    let html = body_text(home).await;
    assert!(html.contains("Museum Guide Experience"));
    assert!(html.contains(r#"href="/scan""#));

    let scan = get(&app, "/scan", None).await;
    assert_eq!(scan.status(), StatusCode::OK);
    assert!(body_text(scan).await.contains("Open Camera"));
}

#[tokio::test]
async fn test_scan_demo_redirects_to_an_exhibit() {
    let app = app();

    let response = get(&app, "/scan/demo", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response).to_string();
    let exhibit = target.strip_prefix("/v/").unwrap();
    assert!(Catalog::builtin().get(exhibit).is_some());
}

#[tokio::test]
async fn test_bare_exhibit_route_offers_languages() {
    let app = app();

    let response = get(&app, "/v/exhibit01", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("The Courtyard Fountain"));
    assert!(html.contains(r#"href="/v/exhibit01/language/fr""#));
    assert!(html.contains(r#"href="/v/exhibit01/language/ar""#));
    assert!(html.contains(r#"dir="rtl""#));
}

#[tokio::test]
async fn test_language_choice_navigates_to_qualified_route() {
    let app = app();

    let response = get(&app, "/v/exhibit01/language/fr", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/v/exhibit01-fr");

    let unknown = get(&app, "/v/exhibit01/language/xx", None).await;
    assert_eq!(unknown.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&unknown), "/v/exhibit01");

    let missing = get(&app, "/v/nowhere/language/fr", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_qualified_route_renders_player() {
    let app = app();

    let response = get(&app, "/v/exhibit01-fr?token=abc123", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("https://www.youtube-nocookie.com/embed/UnSwaiO-w3I"));
    assert!(html.contains("/ws/player/exhibit01-fr"));
    assert!(html.contains("The Courtyard Fountain"));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn test_embed_origin_omits_base_url_path() {
    let mut config = DocentConfig::for_testing();
    config.server.public_base_url = "https://museum.example/guide".to_string();
    let app = build_router(AppState::new(config, Catalog::builtin()).unwrap());

    let html = body_text(get(&app, "/v/exhibit01-fr", None).await).await;
    assert!(html.contains(r#"origin=https%3A%2F%2Fmuseum.example""#));
    assert!(!html.contains("origin=https%3A%2F%2Fmuseum.example%2Fguide"));

    let links = body_text(get(&app, "/api/exhibits", None).await).await;
    assert!(links.contains("https://museum.example/guide/v/exhibit01"));
}

#[tokio::test]
async fn test_unknown_route_shows_not_found() {
    let app = app();

    let response = get(&app, "/v/nowhere", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Video not found."));
    assert!(html.contains(r#"href="/""#));
}

#[tokio::test]
async fn test_admin_requires_session() {
    let app = app();

    let response = get(&app, "/admin", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");

    let response = post_form(&app, "/admin/exhibits", "exhibit_id=exhibit01", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth");

    let forged = get(
        &app,
        "/admin",
        Some("docent_session=67e55044-10b1-426f-9247-bb680e5fe0c8"),
    )
    .await;
    assert_eq!(forged.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_failed_sign_in_stays_on_form() {
    let app = app();

    let response = post_form(&app, "/auth", "email=curator%40museum.test&password=nope", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Invalid email or password"));
    assert!(html.contains(r#"value="curator@museum.test""#));
}

#[tokio::test]
async fn test_admin_workspace_flow() {
    let app = app();
    let cookie = signed_in_cookie(&app).await;

    let dashboard = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(body_text(dashboard).await.contains("No exhibits added yet"));

    let empty = post_form(&app, "/admin/links", "", Some(&cookie)).await;
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(empty).await.contains("Add at least one exhibit"));

    let added = post_form(&app, "/admin/exhibits", "exhibit_id=exhibit01", Some(&cookie)).await;
    assert_eq!(added.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&added), "/admin");

    let duplicate = post_form(&app, "/admin/exhibits", "exhibit_id=exhibit01", Some(&cookie)).await;
    assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let base = post_form(
        &app,
        "/admin/base-url",
        "base_url=https%3A%2F%2Fguide.example%2F",
        Some(&cookie),
    )
    .await;
    assert_eq!(base.status(), StatusCode::SEE_OTHER);

    let links = post_form(&app, "/admin/links", "", Some(&cookie)).await;
    assert_eq!(links.status(), StatusCode::OK);
    let html = body_text(links).await;
    assert!(html.contains("Created 1 QR code URLs using base URL: https://guide.example"));
    assert!(html.contains("https://guide.example/v/exhibit01"));

    let removed = post_form(&app, "/admin/exhibits/exhibit01/remove", "", Some(&cookie)).await;
    assert_eq!(removed.status(), StatusCode::SEE_OTHER);

    let signed_out = post_form(&app, "/auth/signout", "", Some(&cookie)).await;
    assert_eq!(signed_out.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_out), "/");

    let after = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&after), "/auth");
}

#[tokio::test]
async fn test_api_lists_catalog_links() {
    let app = app();

    let response = get(&app, "/api/exhibits", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let links: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let links = links.as_array().unwrap();
    assert_eq!(links.len(), Catalog::builtin().len());
    assert!(
        links
            .iter()
            .any(|link| link["url"] == "http://127.0.0.1:3000/v/exhibit01")
    );
}
