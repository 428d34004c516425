//! Reachability check for audio sources

use std::path::Path;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::ProbeError;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);
const BUILTIN_PREFIX: &str = "builtin:";

pub trait SourceProbe: Send + Sync {
    fn probe<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<(), ProbeError>>;
}

/// Default probe: HEAD for http(s) sources, existence check for local files,
/// and no check for sources bundled with the library.
pub struct SourceChecker {
    http: reqwest::Client,
}

impl SourceChecker {
    pub fn new() -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { http })
    }

    async fn check(&self, source: &str) -> Result<(), ProbeError> {
        if source.starts_with(BUILTIN_PREFIX) {
            return Ok(());
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            let response = self.http.head(source).send().await?;
            let status = response.status();
            tracing::debug!(source, status = status.as_u16(), "Probed remote source");
            return if status.is_success() {
                Ok(())
            } else {
                Err(ProbeError::Status {
                    url: source.to_string(),
                    status: status.as_u16(),
                })
            };
        }

        let path = Path::new(source.strip_prefix("file://").unwrap_or(source));
        match tokio::fs::try_exists(path).await {
            Ok(true) => Ok(()),
            _ => Err(ProbeError::Missing(path.display().to_string())),
        }
    }
}

impl SourceProbe for SourceChecker {
    fn probe<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<(), ProbeError>> {
        self.check(source).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn direct_checker() -> SourceChecker {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(PROBE_TIMEOUT)
            .build()
            .expect("client builds");
        SourceChecker { http }
    }

    /// Answer every request with `status`, reporting each request line.
    async fn serve_status(status: &'static str) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

                let response =
                    format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}/music/track.mp3"), rx)
    }

    #[tokio::test]
    async fn remote_source_is_checked_with_head() {
        let checker = direct_checker();
        let (url, mut requests) = serve_status("200 OK").await;

        assert!(checker.probe(&url).await.is_ok());
        assert_eq!(
            requests.recv().await.as_deref(),
            Some("HEAD /music/track.mp3 HTTP/1.1")
        );
    }

    #[tokio::test]
    async fn remote_error_status_is_reported() {
        let checker = direct_checker();
        let (url, _requests) = serve_status("404 Not Found").await;

        match checker.probe(&url).await {
            Err(ProbeError::Status { url: reported, status }) => {
                assert_eq!(status, 404);
                assert_eq!(reported, url);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn builtin_sources_are_always_reachable() {
        let checker = SourceChecker::new().expect("client builds");
        assert!(checker.probe("builtin:anything").await.is_ok());
    }

    #[tokio::test]
    async fn local_files_must_exist() {
        let checker = SourceChecker::new().expect("client builds");
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_string_lossy().to_string();

        assert!(checker.probe(&path).await.is_ok());
        assert!(checker.probe(&format!("file://{path}")).await.is_ok());

        let missing = format!("{path}.missing");
        assert!(matches!(
            checker.probe(&missing).await,
            Err(ProbeError::Missing(_))
        ));
    }
}
