// SPDX-License-Identifier: MIT
//! Tests for the production probe's URL reachability, against a local
//! mock HTTP server.

use syscheck::{OsProbe, SystemProbe};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_url_reachable_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let probe = OsProbe::new().unwrap();
    assert!(probe.url_reachable(&server.uri()).await);
}

#[tokio::test]
async fn test_url_unreachable_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probe = OsProbe::new().unwrap();
    assert!(!probe.url_reachable(&server.uri()).await);
}

#[tokio::test]
async fn test_url_unreachable_on_connection_refused() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let probe = OsProbe::new().unwrap();
    assert!(!probe.url_reachable(&uri).await);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_memory_stats_reads_real_meminfo() {
    let probe = OsProbe::new().unwrap();
    let stats = probe.memory_stats().unwrap();
    assert!(stats.available_mb() > 0.0);
}
