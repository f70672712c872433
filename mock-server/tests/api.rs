use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Uploaded};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- fixed bodies ---

#[tokio::test]
async fn ok_returns_hello() {
    let resp = app().oneshot(get("/ok")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(body_bytes(resp).await, "hello");
}

#[tokio::test]
async fn json_returns_object() {
    let resp = app().oneshot(get("/json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let value: serde_json::Value = body_json(resp).await;
    assert_eq!(value, serde_json::json!({"a": 1}));
}

#[tokio::test]
async fn binary_returns_every_byte() {
    let resp = app().oneshot(get("/binary")).await.unwrap();
    let bytes = body_bytes(resp).await;
    assert_eq!(bytes.len(), 256);
    assert_eq!(bytes[255], 255);
}

// --- redirect ---

#[tokio::test]
async fn redirect_points_at_ok() {
    let resp = app().oneshot(get("/redirect")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[http::header::LOCATION], "/ok");
}

#[tokio::test]
async fn loop_redirects_to_itself() {
    let resp = app().oneshot(get("/loop")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[http::header::LOCATION], "/loop");
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let req = Request::builder()
        .method("DELETE")
        .uri("/echo")
        .header("x-token", "abc")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.headers["x-token"], "abc");
    assert_eq!(echo.body, "payload");
}

// --- upload ---

#[tokio::test]
async fn upload_decodes_files_and_fields() {
    let body = "--B\r\n\
Content-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\n\
Content-Type: application/octet-stream\r\n\
\r\n\
file bytes\r\n\
--B\r\n\
Content-Disposition: form-data; name=\"name\"\r\n\
\r\n\
bob\r\n\
--B--\r\n";
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=B")
        .body(body.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let uploaded: Uploaded = body_json(resp).await;
    assert_eq!(uploaded.method, "POST");
    assert_eq!(uploaded.files["doc"].filename, "a.txt");
    assert_eq!(uploaded.files["doc"].bytes, b"file bytes");
    assert_eq!(uploaded.fields["name"], "bob");
}

#[tokio::test]
async fn upload_without_multipart_is_rejected() {
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .body("plain".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}
