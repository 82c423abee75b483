use crate::adapters::{endpoint, required_text, selector, HtmlFetcher};
use crate::domain::model::{Extraction, Field, JobPosting, Source, SourceYield};
use crate::domain::ports::JobSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.reed.co.uk";

const LISTING: &str = "article.card.job-card_jobCard__MkcJD";
const TITLE: &str = "h2";
const LOCATION: &str = r#"li[data-qa="job-card-location"]"#;
const SALARY: &str = "li.job-card_jobMetadata__item___QNud";

pub struct ReedSource {
    fetcher: HtmlFetcher,
    base_url: String,
}

impl ReedSource {
    pub fn new(fetcher: HtmlFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn search_url(&self, query: &str, page: u32) -> Result<Url> {
        let mut url = endpoint(&self.base_url, "/jobs/engineering-jobs")?;
        url.query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("pageno", &page.to_string());
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
                    source: Source::Reed,
                })
            })
            .collect();

        Ok(extractions)
    }
}

#[async_trait]
impl JobSource for ReedSource {
    fn source(&self) -> Source {
        Source::Reed
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<SourceYield> {
        let url = self.search_url(query, page)?;
        let html = self.fetcher.get_html(self.source(), url).await?;
        Ok(SourceYield::from_extractions(self.source(), self.parse(&html)?))
    }
}
