//! Shared fixtures for dispatch and HTTP tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use hedged_curl::{Target, Transport, TransportError};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    time,
};

/// How a scripted endpoint answers.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Body(&'static str),
    Fail,
}

/// In-memory transport whose endpoints answer after fixed delays.
///
/// `released` counts requests whose in-flight state was dropped, whether
/// they completed or were abandoned.
#[derive(Default)]
pub struct Scripted {
    routes: HashMap<&'static str, (Duration, Reply)>,
    pub calls: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, name: &'static str, after: Duration, reply: Reply) -> Self {
        self.routes.insert(name, (after, reply));
        self
    }
}

struct Connection(Arc<AtomicUsize>);

impl Drop for Connection {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Transport for Scripted {
    type Response = String;

    async fn send(&self, target: &Target) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _conn = Connection(self.released.clone());

        let (after, reply) = self
            .routes
            .get(target.as_str())
            .copied()
            .ok_or_else(|| TransportError::InvalidTarget(target.to_string()))?;

        time::sleep(after).await;
        match reply {
            Reply::Body(body) => Ok(body.to_string()),
            Reply::Fail => Err(TransportError::Other(format!("{target} refused"))),
        }
    }
}

pub fn targets(names: &[&str]) -> Vec<Target> {
    names.iter().copied().map(Target::new).collect()
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Start a mock HTTP backend on an ephemeral port.
///
/// Each connection waits `delay`, then answers with `status` and `body`.
pub async fn start_backend(status: u16, body: &'static str, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                read_request(&mut socket).await;
                time::sleep(delay).await;

                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a backend that accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}
