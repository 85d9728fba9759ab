use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A toy HTTP server answering the `n`-th connection with the `n`-th raw response of its
/// script, repeating the last one. Each connection serves one request and is then closed.
pub struct SimpleServer {
    listener: TcpListener,
    raw_http_responses: Vec<String>,
    connections: Arc<AtomicUsize>,
}

impl SimpleServer {
    pub async fn new(raw_http_responses: &[&str]) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self {
            listener,
            raw_http_responses: raw_http_responses.iter().map(|r| r.to_string()).collect(),
            connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn uri(&self) -> String {
        let port = self.listener.local_addr().map(|addr| addr.port()).unwrap_or(0);
        format!("http://127.0.0.1:{}", port)
    }

    /// Number of connections accepted so far.
    pub fn connections(&self) -> Arc<AtomicUsize> {
        self.connections.clone()
    }

    pub async fn start(self) {
        loop {
            let mut stream = match self.listener.accept().await {
                Ok((stream, _)) => stream,
                Err(e) => {
                    println!("Connection failed: {}", e);
                    continue;
                }
            };
            let n = self.connections.fetch_add(1, Ordering::SeqCst);
            let response = &self.raw_http_responses[n.min(self.raw_http_responses.len() - 1)];

            // 1024 bytes is enough for a toy HTTP server
            let mut buffer = [0; 1024];
            if let Err(e) = stream.read(&mut buffer).await {
                println!("Error reading request: {}", e);
                continue;
            }
            if let Err(e) = stream.write_all(response.as_bytes()).await {
                println!("Error writing response: {}", e);
            }
            let _ = stream.shutdown().await;
        }
    }
}
