//! Streamed HTTP-to-disk transfer.

use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::DownloadError;

/// Streams remote resources to local files without buffering the payload in
/// memory, so multi-hundred-megabyte videos download in constant space.
#[derive(Clone)]
pub struct FileFetcher {
    http: Client,
}

impl FileFetcher {
    /// Transfers are bounded per connect and per read rather than per
    /// request, so a stalled stream errors out while a long video download
    /// does not.
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Download `url` into `dest`, resolving only once the file has been
    /// fully written and flushed.
    pub async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DownloadError::Api { status, body });
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        debug!("wrote {} bytes to {}", written, dest.display());
        Ok(())
    }
}
