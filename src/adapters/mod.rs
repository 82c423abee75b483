// Adapters layer: one module per job site plus the shared HTTP and HTML helpers.

pub mod graduate_jobs;
pub mod http;
pub mod jobs_ac_uk;
pub mod reed;

pub use graduate_jobs::GraduateJobsSource;
pub use http::HtmlFetcher;
pub use jobs_ac_uk::JobsAcUkSource;
pub use reed::ReedSource;

use crate::domain::model::{Field, SkipReason};
use crate::utils::error::{Result, ScoutError};
use scraper::{ElementRef, Selector};
use url::Url;

/// 把連續空白 (含換行) 壓成單一空格並去除頭尾
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScoutError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// 元素底下所有文字，清理後回傳
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// 在列表片段中取第一個符合的子元素文字；缺少元素或清理後為空都算略過
pub(crate) fn required_text(
    fragment: ElementRef<'_>,
    selector: &Selector,
    css: &'static str,
    field: Field,
) -> std::result::Result<String, SkipReason> {
    let element = fragment
        .select(selector)
        .next()
        .ok_or(SkipReason::MissingElement {
            field,
            selector: css,
        })?;

    let text = element_text(element);
    if text.is_empty() {
        return Err(SkipReason::EmptyField { field });
    }
    Ok(text)
}

/// 以 base_url 加上路徑建立搜尋網址
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        path
    ))?)
}
