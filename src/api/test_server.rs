//! A tiny canned-response HTTP server for exercising the client in tests.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Routes keyed by request target, e.g. `"/pokemon?limit=20&offset=0"`.
/// Unrouted targets answer 404.
pub struct StubApi {
    routes: HashMap<String, (u16, String)>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn route(mut self, target: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(target.to_string(), (status, body.into()));
        self
    }

    /// Starts serving on an ephemeral port and returns the base URL.
    pub async fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(self.routes);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let read = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..read]);
                    let target = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();

                    let (status, body) = routes
                        .get(&target)
                        .cloned()
                        .unwrap_or((404, r#"{"detail":"Not found."}"#.to_string()));
                    let reply = format!(
                        "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }
}

pub fn pokemon_json(name: &str, types: &[&str], attack: u16, defense: u16) -> String {
    let types: Vec<String> = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                r#"{{"slot": {}, "type": {{"name": "{}", "url": "http://stub/type/{}/"}}}}"#,
                i + 1,
                t,
                t
            )
        })
        .collect();
    format!(
        r#"{{"name": "{name}", "types": [{types}], "stats": [
            {{"base_stat": 50, "stat": {{"name": "hp", "url": "http://stub/stat/1/"}}}},
            {{"base_stat": {attack}, "stat": {{"name": "attack", "url": "http://stub/stat/2/"}}}},
            {{"base_stat": {defense}, "stat": {{"name": "defense", "url": "http://stub/stat/3/"}}}}
        ], "sprites": {{"front_default": "http://stub/sprites/{name}.png"}}}}"#,
        name = name,
        types = types.join(","),
        attack = attack,
        defense = defense
    )
}

pub fn roster_json(names: &[&str]) -> String {
    let results: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"{{"name": "{}", "url": "https://pokeapi.co/api/v2/pokemon/{}/"}}"#,
                name,
                i + 1
            )
        })
        .collect();
    format!(r#"{{"count": {}, "results": [{}]}}"#, names.len(), results.join(","))
}
