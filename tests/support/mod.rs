#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Local HTTP service answering each path with a fixed JSON body.
pub struct ScriptedService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedService {
    /// `routes` maps `"METHOD /path"` to `(status line, body)`; unknown routes get a 404.
    pub fn start(routes: Vec<(&'static str, &'static str, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local service");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let routes: HashMap<&'static str, (&'static str, String)> = routes
            .into_iter()
            .map(|(route, status, body)| (route, (status, body)))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let request = read_request(&mut stream);
                let route = request_line(&request);
                let (status, body) = routes
                    .get(route.as_str())
                    .cloned()
                    .unwrap_or(("404 NOT FOUND", "{}".to_string()));
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                seen.lock().expect("request log").push(request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self { base_url, requests }
    }

    /// Raw requests whose request line starts with `prefix`, e.g. `"GET /models"`.
    pub fn requests_to(&self, prefix: &str) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log")
            .iter()
            .filter(|request| request.starts_with(prefix))
            .cloned()
            .collect()
    }
}

/// Poll `done` until it returns `true`, panicking after five seconds.
pub fn poll_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out waiting for background job");
        thread::sleep(Duration::from_millis(5));
    }
}

fn request_line(request: &str) -> String {
    let line = request.lines().next().unwrap_or_default();
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    format!("{method} {path}")
}

fn read_request(stream: &mut TcpStream) -> String {
    let _ = stream.set_read_timeout(Some(Duration::from_millis(500)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(read) => {
                request.extend_from_slice(&buf[..read]);
                if request_complete(&request) {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&request).into_owned()
}

fn request_complete(request: &[u8]) -> bool {
    let Some(header_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + length
}
