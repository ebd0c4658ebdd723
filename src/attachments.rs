use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::client::LinearClient;
use crate::error::{LinearError, Result};

const UPLOADS_PREFIX: &str = "https://uploads.linear.app/";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Only files hosted on Linear's upload domain may be fetched with the API key.
pub fn validate_attachment_url(url: &str) -> Result<Url> {
    if !url.starts_with(UPLOADS_PREFIX) {
        return Err(LinearError::InvalidUrl(format!(
            "{url} (must be from uploads.linear.app)"
        )));
    }
    Url::parse(url).map_err(|_| LinearError::InvalidUrl(url.to_string()))
}

impl LinearClient {
    pub async fn download_attachment(&self, url: &str, file_path: &Path) -> Result<PathBuf> {
        let url = validate_attachment_url(url)?;
        self.fetch_to_file(url, file_path).await
    }

    async fn fetch_to_file(&self, url: Url, file_path: &Path) -> Result<PathBuf> {
        let response = self
            .http()
            .get(url.clone())
            .header("Content-Type", "application/json")
            .header("Authorization", self.api_key())
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(LinearError::AttachmentDownloadFailed {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        std::fs::write(file_path, &bytes).map_err(|e| LinearError::FileWrite {
            path: file_path.to_path_buf(),
            source: e,
        })?;

        info!(path = %file_path.display(), bytes = bytes.len(), "Downloaded attachment");

        Ok(file_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;

    #[test]
    fn test_validate_attachment_url() {
        assert!(validate_attachment_url("https://uploads.linear.app/abc/file.png").is_ok());
        assert!(validate_attachment_url("https://example.com/file.png").is_err());
        assert!(validate_attachment_url("http://uploads.linear.app/file.png").is_err());
        assert!(validate_attachment_url("https://uploads.linear.app.evil.com/file").is_err());
    }

    #[tokio::test]
    async fn test_download_rejects_foreign_host_without_request() {
        let server = StubServer::start(vec![]).await;
        let dir = tempfile::tempdir().unwrap();

        let err = server
            .client()
            .download_attachment(&server.url("/file.png"), &dir.path().join("file.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, LinearError::InvalidUrl(_)));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_writes_body_with_auth() {
        let server = StubServer::start(vec![StubServer::raw(200, b"\x89PNG data".to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("file.png");

        let url = Url::parse(&server.url("/abc/file.png")).unwrap();
        let path = server.client().fetch_to_file(url, &target).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG data");
        let requests = server.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/abc/file.png");
        assert_eq!(requests[0].header("authorization"), Some("test_api_key"));
        assert!(requests[0].raw_body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status() {
        let server = StubServer::start(vec![StubServer::raw(404, "missing")]).await;
        let dir = tempfile::tempdir().unwrap();

        let url = Url::parse(&server.url("/abc/file.png")).unwrap();
        let err = server
            .client()
            .fetch_to_file(url, &dir.path().join("file.png"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LinearError::AttachmentDownloadFailed { status: 404, .. }
        ));
    }
}
