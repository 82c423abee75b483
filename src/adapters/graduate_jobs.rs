use crate::adapters::{endpoint, required_text, selector, HtmlFetcher};
use crate::domain::model::{Extraction, Field, JobPosting, Source, SourceYield};
use crate::domain::ports::JobSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.graduate-jobs.com";

const LISTING: &str = "a.c-job__item-new.job-list__item";
const TITLE: &str = "p.c-job__title-new";
const LOCATION: &str = "span.c-job__locations";
const SALARY: &str = "p.c-job__locations";

/// graduate-jobs.com，搜尋頁不支援分頁
pub struct GraduateJobsSource {
    fetcher: HtmlFetcher,
    base_url: String,
}

impl GraduateJobsSource {
    pub fn new(fetcher: HtmlFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = endpoint(&self.base_url, "/search")?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    pub fn parse(&self, html: &str) -> Result<Vec<Extraction>> {
        let listing = selector(LISTING)?;
        let title = selector(TITLE)?;
        let location = selector(LOCATION)?;
        let salary = selector(SALARY)?;

        let document = Html::parse_document(html);
        let extractions = document
            .select(&listing)
            .map(|job| -> Extraction {
                Ok(JobPosting {
                    title: required_text(job, &title, TITLE, Field::Title)?,
                    location: required_text(job, &location, LOCATION, Field::Location)?,
                    salary: required_text(job, &salary, SALARY, Field::Salary)?,
                    source: Source::GraduateJobs,
                })
            })
            .collect();

        Ok(extractions)
    }
}

#[async_trait]
impl JobSource for GraduateJobsSource {
    fn source(&self) -> Source {
        Source::GraduateJobs
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<SourceYield> {
        if page > 1 {
            tracing::debug!("{} has no pagination, ignoring page {}", self.source(), page);
        }
        let url = self.search_url(query)?;
        let html = self.fetcher.get_html(self.source(), url).await?;
        Ok(SourceYield::from_extractions(self.source(), self.parse(&html)?))
    }
}
