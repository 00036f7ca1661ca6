//! Static asset serving through the router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use common::{get, send, site};
use undev_engine::http::{App, ACCESS_DENIED_HTML};

fn navigate(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("sec-fetch-mode", "navigate")
        .header("sec-fetch-dest", "document")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_assets_served_with_content_type() {
    let png: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let site = site(&[
        ("public/css/site.css", "body { margin: 0 }".as_bytes()),
        ("public/data.json", "{\"ok\":true}".as_bytes()),
        ("public/img/logo.png", png),
    ]);
    let router = App::new(site.config.clone()).into_router();

    let reply = send(router.clone(), get("/css/site.css")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "text/css; charset=utf-8");
    assert_eq!(reply.text(), "body { margin: 0 }");

    let reply = send(router.clone(), get("/data.json?v=3")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type().starts_with("application/json"));

    let reply = send(router, get("/img/logo.png")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), "image/png");
    assert_eq!(reply.body, png);
}

#[tokio::test]
async fn test_assets_take_precedence_over_routes() {
    let site = site(&[("public/robots.txt", "User-agent: *".as_bytes())]);
    let mut app = App::new(site.config.clone());
    app.get("/robots.txt", |_, res| res.end_with("from handler"));

    let reply = send(app.into_router(), get("/robots.txt")).await;
    assert_eq!(reply.text(), "User-agent: *");
}

#[tokio::test]
async fn test_missing_or_unknown_asset_is_not_found() {
    let site = site(&[("public/archive.xyz", "data".as_bytes())]);
    let router = App::new(site.config.clone()).into_router();

    assert_eq!(send(router.clone(), get("/missing.css")).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(router.clone(), get("/archive.xyz")).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(router, get("/../secret.txt")).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_navigation_to_asset_is_denied() {
    let site = site(&[("public/app.js", "console.log(1)".as_bytes())]);
    let router = App::new(site.config.clone()).into_router();

    let reply = send(router.clone(), navigate("GET", "/app.js")).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.text(), ACCESS_DENIED_HTML);

    // Denied before the file system is consulted.
    let reply = send(router.clone(), navigate("GET", "/does-not-exist.js")).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);

    let reply = send(router, navigate("POST", "/app.js")).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        reply.text(),
        r#"{"ok":false,"status":405,"message":"Доступ запрещён!"}"#
    );
}
