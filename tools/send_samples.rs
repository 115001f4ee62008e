//! Sample Sender
//!
//! Posts classic Iris samples at a running predictor service and prints
//! what comes back. Small smoke tool for manual testing.

use anyhow::{Context, Result};
use iris_predictor::types::request::IrisMeasurements;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const SAMPLES: [(&str, [f64; 4]); 3] = [
    ("setosa", [5.1, 3.5, 1.4, 0.2]),
    ("versicolor", [6.0, 2.9, 4.5, 1.5]),
    ("virginica", [6.7, 3.0, 5.2, 2.3]),
];

#[tokio::main]
async fn main() -> Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8000".to_string());

    let health = send(&addr, "GET", "/", None).await?;
    println!("GET / -> {health}");

    for (expected, [sepal_length, sepal_width, petal_length, petal_width]) in SAMPLES {
        let measurements = IrisMeasurements {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        };
        let body = serde_json::to_string(&measurements)?;
        let reply = send(&addr, "POST", "/predict", Some(&body)).await?;
        println!("POST /predict ({expected}) -> {reply}");
    }

    Ok(())
}

/// Send one request and return the response payload.
async fn send(addr: &str, method: &str, path: &str, body: Option<&str>) -> Result<String> {
    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("Failed to connect to {addr}"))?;

    let body = body.unwrap_or("");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nhost: {addr}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await?;

    let mut reply = String::new();
    stream.read_to_string(&mut reply).await?;

    // headers end at the first blank line, the payload follows
    match reply.split_once("\r\n\r\n") {
        Some((_, payload)) => Ok(payload.to_string()),
        None => Ok(reply),
    }
}
