//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by path. Unknown paths get 404. A route marked slow
//! sends its headers, then one byte every 100ms, so tests can cancel mid-transfer.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub body: Vec<u8>,
    pub slow: bool,
}

impl Route {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body, slow: false }
    }

    pub fn slow(body: Vec<u8>) -> Self {
        Self { body, slow: true }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let route = match routes.get(path) {
        Some(r) => r,
        None => {
            let _ = stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found");
            return;
        }
    };
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/x-tar\r\n\r\n",
        route.body.len()
    );
    if stream.write_all(header.as_bytes()).is_err() {
        return;
    }
    if route.slow {
        for byte in &route.body {
            if stream.write_all(std::slice::from_ref(byte)).is_err() {
                return;
            }
            let _ = stream.flush();
            thread::sleep(Duration::from_millis(100));
        }
    } else {
        let _ = stream.write_all(&route.body);
    }
}
