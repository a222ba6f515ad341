use std::future::Future;

use tracing::{debug, info};

use crate::config::SourceOptions;
use crate::error::NetworkError;
use crate::model::PhotoRecord;

/// A remote listing of photo records. Each call is independent and returns
/// one bounded page; there is no retry and no pagination state.
pub trait PhotoSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<PhotoRecord>, NetworkError>> + Send;
}

/// `PhotoSource` backed by a picsum-style `/v2/list` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPhotoSource {
    client: reqwest::Client,
    endpoint: String,
    page: u32,
    limit: u32,
}

impl HttpPhotoSource {
    pub fn new(opts: &SourceOptions) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(opts.request_timeout)
            .build()
            .map_err(NetworkError::Request)?;
        debug!(
            endpoint = %opts.endpoint,
            timeout = %humantime::format_duration(opts.request_timeout),
            "photo source ready"
        );
        Ok(Self {
            client,
            endpoint: opts.endpoint.clone(),
            page: opts.page,
            limit: opts.limit,
        })
    }
}

impl PhotoSource for HttpPhotoSource {
    async fn fetch(&self) -> Result<Vec<PhotoRecord>, NetworkError> {
        let url = format!("{}?page={}&limit={}", self.endpoint, self.page, self.limit);
        debug!(%url, "requesting photo listing");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(NetworkError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status));
        }

        let photos: Vec<PhotoRecord> = response.json().await.map_err(NetworkError::Malformed)?;
        info!(count = photos.len(), "fetched photo listing");
        Ok(photos)
    }
}
