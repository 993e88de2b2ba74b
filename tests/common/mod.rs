//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use oasis::{HttpServer, Island, IslandRouter, OasisConfig, Shutdown};

/// Render function that echoes the merged data as JSON.
pub fn echo(data: &Map<String, Value>) -> Vec<u8> {
    serde_json::to_vec(data).unwrap_or_default()
}

pub fn island(name: &str) -> Island {
    Island::new(name, echo).unwrap()
}

/// Send one in-process request and collect the response.
pub async fn send(router: &Router, method: Method, path: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

/// Serve `islands` on an ephemeral port.
pub async fn start_server(islands: IslandRouter) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(OasisConfig::default(), islands);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
