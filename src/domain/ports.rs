use crate::domain::model::{Source, SourceYield};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 單一職缺網站的抓取與解析
#[async_trait]
pub trait JobSource: Send + Sync {
    fn source(&self) -> Source;

    /// 抓取一頁搜尋結果。網路失敗回傳錯誤，單筆列表失敗記錄在 `SourceYield::skipped`
    async fn fetch(&self, query: &str, page: u32) -> Result<SourceYield>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self, source: Source) -> &str;
    fn source_enabled(&self, source: Source) -> bool;
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> &str;
    fn concurrent(&self) -> bool;
}
