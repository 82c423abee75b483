use crate::domain::model::Source;
use crate::utils::error::{Result, ScoutError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 共用的 HTTP 客戶端，三個來源共享同一個連線池
#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: Client,
}

impl HtmlFetcher {
    pub fn new(user_agent: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET 並回傳 HTML 原文；非 2xx 狀態視為該來源失敗
    pub async fn get_html(&self, source: Source, url: Url) -> Result<String> {
        tracing::debug!("Requesting {} page: {}", source, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("{} response status: {}", source, status);

        if !status.is_success() {
            return Err(ScoutError::Status {
                source_site: source,
                status,
            });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), source);
        Ok(body)
    }
}

impl Default for HtmlFetcher {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}
