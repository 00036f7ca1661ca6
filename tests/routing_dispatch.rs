//! End-to-end dispatch through the axum router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{get, post, send, site};
use undev_engine::http::{App, NOT_FOUND_HTML};

#[tokio::test]
async fn test_unknown_get_returns_html_not_found() {
    let site = site(&[]);
    let app = App::new(site.config.clone());

    let reply = send(app.into_router(), get("/nowhere")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.text(), NOT_FOUND_HTML);
    assert!(reply.content_type().starts_with("text/html"));
}

#[tokio::test]
async fn test_unknown_post_returns_json_not_found() {
    let site = site(&[]);
    let app = App::new(site.config.clone());

    let reply = send(app.into_router(), post("/nowhere", "x=1")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.content_type().starts_with("application/json"));
    assert_eq!(
        reply.text(),
        r#"{"ok":false,"code":404,"message":"Маршрут не найден"}"#
    );
}

#[tokio::test]
async fn test_placeholder_route_exposes_capture() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.get("/users/[:id]/posts/[:post]", |req, res| {
        res.json(&json!({
            "url": req.url,
            "id": req.param("id"),
            "post": req.param("post"),
        }));
    });
    let router = app.into_router();

    let reply = send(router.clone(), get("/users/42/posts/7")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({"url": "/users/[:id]/posts/[:post]", "id": "42", "post": "7"})
    );

    let reply = send(router, get("/users/42/posts")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_first_registered_route_wins() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.get("/items/[:id]", |_, res| res.end_with("pattern"));
    app.get("/items/new", |_, res| res.end_with("literal"));
    app.get("/items/[:id]", |_, res| res.end_with("duplicate"));

    let reply = send(app.into_router(), get("/items/new")).await;
    assert_eq!(reply.text(), "pattern");
}

#[tokio::test]
async fn test_post_body_and_query() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.post("/echo", |req, res| {
        res.json(&json!({
            "body": req.body_str(),
            "query": req.query,
        }));
    });

    let reply = send(app.into_router(), post("/echo?lang=ru", "hello")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({"body": "hello", "query": "lang=ru"}));
}

#[tokio::test]
async fn test_binary_body_reaches_handler_unchanged() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.post("/upload", |req, res| {
        let raw = req.body.clone().unwrap_or_default();
        res.set_content_type("application/octet-stream");
        res.write(&raw);
        res.write(if req.body_str().is_some() { "|text" } else { "|binary" });
        res.end();
    });

    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .body(Body::from(vec![0xffu8, 0xfe]))
        .unwrap();
    let reply = send(app.into_router(), request).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, b"\xff\xfe|binary");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.get("/", |_, res| res.end_with("home"));
    let router = app.into_router();

    let reply = send(router.clone(), get("/")).await;
    assert!(reply.headers.contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "fixed-id")
        .body(Body::empty())
        .unwrap();
    let reply = send(router, request).await;
    assert_eq!(reply.headers.get("x-request-id").unwrap(), "fixed-id");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut site = site(&[]);
    site.config.limits.max_body_size = 8;
    let mut app = App::new(site.config.clone());
    app.post("/upload", |_, res| res.end_with("stored"));

    let reply = send(app.into_router(), post("/upload", "far more than eight bytes")).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_panicking_handler_yields_500() {
    let site = site(&[]);
    let mut app = App::new(site.config.clone());
    app.get("/boom", |_, _| panic!("handler failure"));
    app.get("/ok", |_, res| res.end_with("still serving"));
    let router = app.into_router();

    let reply = send(router.clone(), get("/boom")).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);

    let reply = send(router, get("/ok")).await;
    assert_eq!(reply.text(), "still serving");
}
