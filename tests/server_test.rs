use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pidog_voice::{ServerConfig, StaticServer};
use tempfile::TempDir;
use tower::ServiceExt;

const PAGE: &str = "<html><body>recorder</body></html>";

fn page_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("voice-recorder.html"), PAGE).unwrap();
    dir
}

fn router(dir: &TempDir, cors: bool) -> Router {
    let config = ServerConfig {
        root: dir.path().to_path_buf(),
        cors,
        ..ServerConfig::default()
    };
    StaticServer::new(config).unwrap().router()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn serves_the_page_at_root_and_by_name() {
    let dir = page_dir();

    for uri in ["/", "/voice-recorder.html"] {
        let response = router(&dir, true).oneshot(request(Method::GET, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_text(response).await, PAGE);
    }
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let dir = page_dir();
    let response = router(&dir, true)
        .oneshot(request(Method::GET, "/missing"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(body_text(response).await, "Not Found");
}

#[tokio::test]
async fn other_verbs_are_not_found() {
    let dir = page_dir();
    let response = router(&dir, true)
        .oneshot(request(Method::POST, "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preflight_is_answered_with_cors_headers() {
    let dir = page_dir();
    let response = router(&dir, true)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .header(header::ORIGIN, "http://robot.local")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "methods: {}", methods);
    }
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("authorization"));
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn without_cors_preflight_is_not_found() {
    let dir = page_dir();
    let response = router(&dir, false)
        .oneshot(request(Method::OPTIONS, "/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn unreadable_page_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let response = router(&dir, true)
        .oneshot(request(Method::GET, "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn serves_over_a_real_socket() {
    let dir = page_dir();
    let config = ServerConfig {
        root: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = StaticServer::new(config).unwrap();
    let handle = tokio::spawn(server.serve(listener));

    let body = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, PAGE);

    handle.abort();
}
