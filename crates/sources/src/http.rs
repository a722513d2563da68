//! HTTP sheet endpoint source
//!
//! Polls a deployed web app that serves the response sheet as JSON.
//! Redirects are followed (script deployments answer through one).

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sheet_pulse_core::constants::FETCH_TIMEOUT;
use sheet_pulse_core::{SnapshotSource, SourceMetadata};
use sheet_pulse_types::{FetchError, Snapshot};

pub struct HttpSheetSource {
    metadata: SourceMetadata,
    client: reqwest::Client,
    url: String,
}

impl HttpSheetSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("sheet-pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(url, client))
    }

    /// Use a preconfigured client (proxies, custom TLS, tests)
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        let url = url.into();
        Self {
            metadata: SourceMetadata {
                id: "http".to_string(),
                location: url.clone(),
            },
            client,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSheetSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Sheet endpoint answered HTTP {}", status);
            return Err(FetchError::Unreachable {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read body: {}", e)))?;

        let snapshot = crate::payload::decode_payload(&body, Utc::now())?;
        debug!(
            "Fetched {} rows x {} columns",
            snapshot.row_count(),
            snapshot.column_count()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/exec", addr)
    }

    fn local_source(url: String) -> HttpSheetSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSheetSource::with_client(url, client)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            "200 OK",
            r#"{"headers":["ts","q"],"rows":[["t1","yes"],["t2","no"]],"totalRows":2}"#,
        )
        .await;
        let snapshot = local_source(url).fetch().await.unwrap();
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(snapshot.header(1), Some("q"));
        assert_eq!(snapshot.total_rows, Some(2));
    }

    #[tokio::test]
    async fn test_non_success_status_is_unreachable() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let err = local_source(url).fetch().await.unwrap_err();
        assert_eq!(err, FetchError::Unreachable { status: 500 });
    }

    #[tokio::test]
    async fn test_upstream_error_document() {
        let url = serve_once("200 OK", r#"{"error":true,"message":"no data found"}"#).await;
        let err = local_source(url).fetch().await.unwrap_err();
        assert_eq!(err, FetchError::Upstream("no data found".to_string()));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_source(format!("http://{}/exec", addr))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_metadata() {
        let source = HttpSheetSource::new("https://script.example.com/exec").unwrap();
        assert_eq!(source.metadata().id, "http");
        assert_eq!(source.url(), "https://script.example.com/exec");
    }
}
