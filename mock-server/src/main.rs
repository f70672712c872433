//! Standalone stub server for poking at the client by hand.

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("stub server on http://{addr} (/ok /json /text /binary /echo /redirect /upload)");
    mock_server::run(listener).await
}
