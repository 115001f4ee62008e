//! Minimal HTTP/1.1 handling over tokio streams.
//!
//! Covers the subset the service needs: request line, headers, a
//! content-length body, and JSON responses. Every response carries
//! `connection: close`; clients open a fresh connection per request.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// A parsed incoming request.
#[derive(Debug)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// Read one request from the stream.
///
/// Returns `None` when the peer closed the connection before sending a
/// request line. Malformed requests and oversized bodies are errors.
pub async fn read_request<R>(reader: &mut BufReader<R>) -> Result<Option<Request>>
where
    R: AsyncRead + Unpin,
{
    let mut line = String::new();
    let n = reader
        .read_line(&mut line)
        .await
        .context("Failed to read request line")?;
    if n == 0 {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let (method, path) = match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => (method.to_string(), path.to_string()),
        _ => bail!("Malformed request line: {line:?}"),
    };

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        let n = reader
            .read_line(&mut header)
            .await
            .context("Failed to read header line")?;
        if n == 0 {
            bail!("Connection closed before end of headers");
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value
                    .trim()
                    .parse()
                    .context("Invalid content-length header")?;
            }
        }
    }

    if content_length > MAX_BODY_BYTES {
        bail!("Request body too large: {content_length} bytes");
    }

    let mut body = vec![0u8; content_length];
    reader
        .read_exact(&mut body)
        .await
        .context("Failed to read request body")?;

    Ok(Some(Request { method, path, body }))
}

/// An outgoing response with a JSON body.
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Build a response by serializing `payload`.
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Response {
        match serde_json::to_vec(payload) {
            Ok(body) => Response { status, body },
            Err(_) => Response {
                status: 500,
                body: br#"{"error":"response serialization failed"}"#.to_vec(),
            },
        }
    }

    /// Write the response to the stream and flush it.
    pub async fn write_to<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let head = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            self.status,
            reason(self.status),
            self.body.len()
        );
        writer
            .write_all(head.as_bytes())
            .await
            .context("Failed to write response head")?;
        writer
            .write_all(&self.body)
            .await
            .context("Failed to write response body")?;
        writer.flush().await.context("Failed to flush response")?;
        Ok(())
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
