//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cropframe_core::{Delivery, DeliveryError, ExportArtifact, Surface};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A source whose pixels encode their own coordinates.
pub fn coordinate_image(width: u32, height: u32) -> Arc<Surface> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]);
        }
    }
    Arc::new(Surface::new(width, height, pixels))
}

/// A request as seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// One canned HTTP response, served to every connection.
pub struct StubServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub async fn start(status: u16, content_type: Option<&'static str>, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                captured.lock().unwrap().push(request);

                let mut head = format!("HTTP/1.1 {status} Stub\r\nContent-Length: {}\r\n", body.len());
                if let Some(ct) = content_type {
                    head.push_str(&format!("Content-Type: {ct}\r\n"));
                }
                head.push_str("Connection: close\r\n\r\n");

                stream.write_all(head.as_bytes()).await.unwrap();
                stream.write_all(&body).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        method,
        path,
        body: buf[header_end..header_end + content_length].to_vec(),
    }
}

/// Delivery that keeps artifacts in memory and logs every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelivery {
    pub events: Arc<Mutex<Vec<String>>>,
    pub artifacts: Arc<Mutex<Vec<ExportArtifact>>>,
}

impl RecordingDelivery {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn artifacts(&self) -> Vec<ExportArtifact> {
        self.artifacts.lock().unwrap().clone()
    }
}

impl Delivery for RecordingDelivery {
    type Handle = usize;

    fn deliver(&mut self, artifact: ExportArtifact) -> Result<usize, DeliveryError> {
        let mut artifacts = self.artifacts.lock().unwrap();
        artifacts.push(artifact);
        let id = artifacts.len();
        self.events.lock().unwrap().push(format!("deliver {id}"));
        Ok(id)
    }

    fn release(&mut self, handle: usize) {
        self.events.lock().unwrap().push(format!("release {handle}"));
    }
}
