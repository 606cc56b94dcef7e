use crate::app::recorded::{RecordedId, RecordedItem, RecordedPage};
use crate::app::state_delete_dialog::DeleteTarget;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("recorded item is being streamed")]
    StreamingInProgress,
    #[error("file is locked")]
    FileLocked,
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

/// Server-side operations on recorded items.
#[async_trait]
pub trait RecordedApi: Send + Sync {
    /// Removes the item and every file it owns.
    async fn delete_all(&self, recorded_id: RecordedId) -> Result<(), ApiError>;

    /// Removes a single file, keeping the item itself.
    async fn delete_file(&self, recorded_id: RecordedId, target: DeleteTarget)
        -> Result<(), ApiError>;

    async fn refresh_list(&self) -> Result<(), ApiError>;

    async fn refresh_tags(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeleteKind {
    All,
    File,
}

fn delete_status_error(kind: DeleteKind, status: StatusCode, url: &Url) -> ApiError {
    match (kind, status) {
        (DeleteKind::All, StatusCode::CONFLICT) => ApiError::StreamingInProgress,
        (DeleteKind::File, StatusCode::CONFLICT | StatusCode::LOCKED) => ApiError::FileLocked,
        _ => ApiError::Other(anyhow!("unexpected status {} from DELETE {}", status, url)),
    }
}

/// HTTP client for the recording server's `/api/recorded` endpoints.
#[derive(Debug)]
pub struct HttpRecordedApi {
    client: Client,
    base_url: Url,
    refresh_limit: u32,
    recorded: Mutex<Option<RecordedPage>>,
    tags: Mutex<Option<serde_json::Value>>,
}

impl HttpRecordedApi {
    pub fn new(base_url: Url, timeout: Duration, refresh_limit: u32) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url,
            refresh_limit,
            recorded: Mutex::new(None),
            tags: Mutex::new(None),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("base url '{}' cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn recorded_url(&self, recorded_id: RecordedId) -> Result<Url, ApiError> {
        self.endpoint(&["api", "recorded", &recorded_id.to_string()])
    }

    fn file_url(&self, recorded_id: RecordedId, target: DeleteTarget) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", "recorded", &recorded_id.to_string(), "file"])?;
        if let DeleteTarget::Encoded(encoded_id) = target {
            url.query_pairs_mut()
                .append_pair("encodedId", &encoded_id.to_string());
        }
        Ok(url)
    }

    pub async fn fetch_recorded(&self, recorded_id: RecordedId) -> Result<RecordedItem, ApiError> {
        let url = self.recorded_url(recorded_id)?;
        debug!(%url, "fetching recorded item");
        let item = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {} failed", url))?
            .json::<RecordedItem>()
            .await
            .with_context(|| format!("GET {} returned an unexpected body", url))?;
        Ok(item)
    }

    pub fn cached_recorded(&self) -> Option<RecordedPage> {
        self.recorded.lock().clone()
    }

    pub fn cached_tags(&self) -> Option<serde_json::Value> {
        self.tags.lock().clone()
    }

    async fn send_delete(&self, kind: DeleteKind, url: Url) -> Result<(), ApiError> {
        debug!(%url, "sending delete");
        let response = self
            .client
            .request(Method::DELETE, url.clone())
            .send()
            .await
            .with_context(|| format!("DELETE {} failed", url))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(delete_status_error(kind, status, &url))
        }
    }
}

#[async_trait]
impl RecordedApi for HttpRecordedApi {
    async fn delete_all(&self, recorded_id: RecordedId) -> Result<(), ApiError> {
        let url = self.recorded_url(recorded_id)?;
        self.send_delete(DeleteKind::All, url).await
    }

    async fn delete_file(
        &self,
        recorded_id: RecordedId,
        target: DeleteTarget,
    ) -> Result<(), ApiError> {
        let url = self.file_url(recorded_id, target)?;
        self.send_delete(DeleteKind::File, url).await
    }

    async fn refresh_list(&self) -> Result<(), ApiError> {
        let mut url = self.endpoint(&["api", "recorded"])?;
        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("limit", &self.refresh_limit.to_string());
        debug!(%url, "refreshing recorded list");
        let page = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {} failed", url))?
            .json::<RecordedPage>()
            .await
            .with_context(|| format!("GET {} returned an unexpected body", url))?;
        *self.recorded.lock() = Some(page);
        Ok(())
    }

    async fn refresh_tags(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "recorded", "tags"])?;
        debug!(%url, "refreshing tag index");
        let tags = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {} failed", url))?
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("GET {} returned an unexpected body", url))?;
        *self.tags.lock() = Some(tags);
        Ok(())
    }
}
