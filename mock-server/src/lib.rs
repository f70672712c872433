use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::Multipart,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` saw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// One file part received by `/upload`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Everything `/upload` decoded from a multipart body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Uploaded {
    pub method: String,
    pub files: BTreeMap<String, UploadedFile>,
    pub fields: BTreeMap<String, String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/ok", get(ok))
        .route("/json", get(json))
        .route("/text", get(text))
        .route("/binary", get(binary))
        .route("/echo", any(echo))
        .route("/redirect", get(redirect))
        .route("/loop", get(redirect_loop))
        .route("/upload", any(upload))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve on a random local port from a background thread and return the
/// bound address. The server lives until the process exits.
pub fn spawn() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = std_listener.local_addr().expect("mock server address");
    std_listener.set_nonblocking(true).expect("nonblocking listener");

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock server runtime");
        rt.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run(listener).await
        })
    });
    addr
}

async fn ok() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "hello")
}

async fn json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"a":1}"#)
}

async fn text() -> &'static str {
    "not json"
}

async fn binary() -> impl IntoResponse {
    let bytes: Vec<u8> = (0..=255).collect();
    ([(header::CONTENT_TYPE, "application/octet-stream")], bytes)
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/ok")], "redirecting")
}

async fn redirect_loop() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/loop")])
}

async fn upload(method: Method, mut multipart: Multipart) -> Result<Json<Uploaded>, StatusCode> {
    let mut uploaded = Uploaded {
        method: method.to_string(),
        ..Uploaded::default()
    };
    while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        match filename {
            Some(filename) => {
                uploaded.files.insert(name, UploadedFile { filename, bytes: data.to_vec() });
            }
            None => {
                let value = String::from_utf8(data.to_vec()).map_err(|_| StatusCode::BAD_REQUEST)?;
                uploaded.fields.insert(name, value);
            }
        }
    }
    Ok(Json(uploaded))
}
