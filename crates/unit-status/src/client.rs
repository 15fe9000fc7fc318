//! Status client — one HTTP/1 request against the control socket.
//!
//! Connects to the control Unix socket, performs `GET /status`, and
//! decodes the JSON body into a [`StatusSnapshot`]. Each call is a single
//! attempt bounded by the configured timeout; retry policy belongs to the
//! caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;
use tracing::debug;

use crate::error::{StatusError, StatusResult};
use crate::types::StatusSnapshot;

/// Default location of the control socket.
pub const DEFAULT_CONTROL_SOCKET: &str = "/var/run/control.unit.sock";

/// Path of the status endpoint on the control API.
const STATUS_PATH: &str = "/status";

/// Source of status snapshots.
///
/// The production implementation is [`StatusClient`]; tests substitute
/// fakes to exercise collection without a running server.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch one fresh snapshot. A single attempt; any transport or
    /// decode failure surfaces as a [`StatusError`].
    async fn fetch(&self) -> StatusResult<StatusSnapshot>;
}

/// HTTP-over-Unix-socket client for the control API.
#[derive(Debug, Clone)]
pub struct StatusClient {
    socket: PathBuf,
    timeout: Duration,
}

impl StatusClient {
    /// Create a client for the given control socket path.
    pub fn new(socket: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            socket: socket.into(),
            timeout,
        }
    }

    /// The control socket path this client connects to.
    pub fn socket(&self) -> &Path {
        &self.socket
    }

    async fn request_status(&self) -> StatusResult<StatusSnapshot> {
        let stream = UnixStream::connect(&self.socket)
            .await
            .map_err(StatusError::Connect)?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(StatusError::Handshake)?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = http::Request::builder()
            .method("GET")
            .uri(STATUS_PATH)
            .header("host", "unix")
            .body(Empty::<bytes::Bytes>::new())
            .unwrap();

        let resp = sender
            .send_request(req)
            .await
            .map_err(StatusError::Request)?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), "control API returned non-success");
            return Err(StatusError::HttpStatus(resp.status()));
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(StatusError::Body)?;

        serde_json::from_slice(&body.to_bytes()).map_err(StatusError::Decode)
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self) -> StatusResult<StatusSnapshot> {
        match tokio::time::timeout(self.timeout, self.request_status()).await {
            Ok(result) => result,
            Err(_) => Err(StatusError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use http_body_util::Full;
    use hyper::service::service_fn;
    use tokio::net::UnixListener;

    const STATUS_BODY: &str = r#"{
        "connections": {"accepted": 10, "active": 2, "idle": 1, "closed": 7},
        "requests": {"total": 100},
        "applications": {
            "app1": {
                "requests": {"active": 3},
                "processes": {"running": 2, "starting": 0, "idle": 1}
            }
        }
    }"#;

    fn socket_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("unit-status-{}-{name}.sock", std::process::id()))
    }

    /// Serve one canned HTTP response on a fresh Unix socket.
    fn serve_once(path: &Path, status: u16, body: &'static str) {
        let _ = std::fs::remove_file(path);
        let listener = UnixListener::bind(path).unwrap();
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                let io = TokioIo::new(stream);
                let service = service_fn(move |_req| async move {
                    Ok::<_, std::convert::Infallible>(
                        hyper::Response::builder()
                            .status(status)
                            .body(Full::new(bytes::Bytes::from_static(body.as_bytes())))
                            .unwrap(),
                    )
                });
                let _ = hyper::server::conn::http1::Builder::new()
                    .serve_connection(io, service)
                    .await;
            }
        });
    }

    #[tokio::test]
    async fn fetch_decodes_status_body() {
        let path = socket_path("ok");
        serve_once(&path, 200, STATUS_BODY);

        let client = StatusClient::new(&path, Duration::from_secs(2));
        let snapshot = client.fetch().await.unwrap();

        assert_eq!(snapshot.connections.accepted, 10.0);
        assert_eq!(snapshot.requests.total, 100.0);
        assert_eq!(snapshot.applications["app1"].requests.active, 3.0);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let path = socket_path("forbidden");
        serve_once(&path, 403, "denied");

        let client = StatusClient::new(&path, Duration::from_secs(2));
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, StatusError::HttpStatus(_)), "got {err:?}");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let path = socket_path("malformed");
        serve_once(&path, 200, "not json at all");

        let client = StatusClient::new(&path, Duration::from_secs(2));
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, StatusError::Decode(_)), "got {err:?}");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_socket_is_a_connect_error() {
        let path = socket_path("absent");
        let _ = std::fs::remove_file(&path);

        let client = StatusClient::new(&path, Duration::from_secs(2));
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, StatusError::Connect(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unresponsive_server_times_out() {
        let path = socket_path("stuck");
        let _ = std::fs::remove_file(&path);
        let listener = UnixListener::bind(&path).unwrap();

        // Accept the connection but never answer.
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(stream);
            }
        });

        let client = StatusClient::new(&path, Duration::from_millis(100));
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, StatusError::Timeout(_)), "got {err:?}");

        let _ = std::fs::remove_file(&path);
    }
}
