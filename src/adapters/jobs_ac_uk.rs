use crate::adapters::{clean_text, element_text, endpoint, required_text, selector, HtmlFetcher};
use crate::domain::model::{Extraction, Field, JobPosting, Source, SourceYield};
use crate::domain::ports::JobSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.jobs.ac.uk";

const LISTING: &str = "div.j-search-result__result.ie-border-left";
const TITLE: &str = "a";
const DIV: &str = "div";
const INFO: &str = "div.j-search-result__info";

const LOCATION_LABEL: &str = "Location:";
const SALARY_LABEL: &str = "Salary:";
const NOT_AVAILABLE: &str = "N/A";

/// jobs.ac.uk 沒有獨立的地點與薪資元素，靠標籤文字切出來
pub struct JobsAcUkSource {
    fetcher: HtmlFetcher,
    base_url: String,
}

impl JobsAcUkSource {
    pub fn new(fetcher: HtmlFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn search_url(&self, query: &str, page: u32) -> Result<Url> {
        let mut url = endpoint(&self.base_url, "/search/")?;
        url.query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    pub fn parse(&self, html: &str) -> Result<Vec<Extraction>> {
        let listing = selector(LISTING)?;
        let title = selector(TITLE)?;
        let div = selector(DIV)?;
        let info = selector(INFO)?;

        let document = Html::parse_document(html);
        let extractions = document
            .select(&listing)
            .map(|job| -> Extraction {
                Ok(JobPosting {
                    title: required_text(job, &title, TITLE, Field::Title)?,
                    location: labelled_location(job, &div),
                    salary: labelled_salary(job, &info),
                    source: Source::JobsAcUk,
                })
            })
            .collect();

        Ok(extractions)
    }
}

/// 第一個自身文字含 "Location:" 的 div，去掉標籤
fn labelled_location(job: ElementRef<'_>, div: &Selector) -> String {
    let location = job
        .select(div)
        .find(|candidate| {
            candidate
                .children()
                .filter_map(|child| child.value().as_text())
                .any(|text| text.contains(LOCATION_LABEL))
        })
        .map(|candidate| clean_text(&element_text(candidate).replace(LOCATION_LABEL, "")));

    or_not_available(location)
}

/// 資訊區塊 (沒有的話用整個片段) 以 "Salary:" 切開取最後一段
fn labelled_salary(job: ElementRef<'_>, info: &Selector) -> String {
    let text = job
        .select(info)
        .next()
        .map(element_text)
        .unwrap_or_else(|| element_text(job));

    let salary = text
        .contains(SALARY_LABEL)
        .then(|| text.rsplit(SALARY_LABEL).next().map(clean_text))
        .flatten();

    or_not_available(salary)
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[async_trait]
impl JobSource for JobsAcUkSource {
    fn source(&self) -> Source {
        Source::JobsAcUk
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<SourceYield> {
        let url = self.search_url(query, page)?;
        let html = self.fetcher.get_html(self.source(), url).await?;
        Ok(SourceYield::from_extractions(self.source(), self.parse(&html)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SkipReason;

    fn adapter() -> JobsAcUkSource {
        JobsAcUkSource::new(HtmlFetcher::default(), DEFAULT_BASE_URL)
    }

    #[test]
    fn test_search_url() {
        let url = adapter().search_url("research fellow", 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.jobs.ac.uk/search/?keywords=research+fellow&page=2"
        );
    }

    #[test]
    fn test_parse_labelled_fields() {
        let html = r#"
<div class="j-search-result__result ie-border-left">
  <div class="j-search-result__text">
    <a href="/job/ABC123">Research Fellow in
       Machine Learning</a>
  </div>
  <div class="j-search-result__employer">University of Oxford</div>
  <div>Location:   Oxford  </div>
  <div class="j-search-result__info">
    Salary: £38,205 to £45,585 per annum
  </div>
</div>
"#;

        let extractions = adapter().parse(html).unwrap();
        assert_eq!(extractions.len(), 1);
        let posting = extractions[0].clone().unwrap();
        assert_eq!(posting.title, "Research Fellow in Machine Learning");
        assert_eq!(posting.location, "Oxford");
        assert_eq!(posting.salary, "£38,205 to £45,585 per annum");
        assert_eq!(posting.source, Source::JobsAcUk);
    }

    #[test]
    fn test_missing_labels_default_to_not_available() {
        let html = r#"
<div class="j-search-result__result ie-border-left">
  <a href="/job/1">Lecturer in Physics</a>
  <div class="j-search-result__info">Competitive salary</div>
</div>
<div class="j-search-result__result ie-border-left">
  <a href="/job/2">Lab Technician</a>
  <div>Location:</div>
</div>
"#;

        let postings: Vec<JobPosting> = adapter()
            .parse(html)
            .unwrap()
            .into_iter()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].location, "N/A");
        assert_eq!(postings[0].salary, "N/A");
        assert_eq!(postings[1].location, "N/A");
        assert_eq!(postings[1].salary, "N/A");
    }

    #[test]
    fn test_listing_without_title_link_is_skipped() {
        let html = r#"
<div class="j-search-result__result ie-border-left">
  <div>Location: Glasgow</div>
</div>
"#;

        let extractions = adapter().parse(html).unwrap();
        assert_eq!(
            extractions,
            vec![Err(SkipReason::MissingElement {
                field: Field::Title,
                selector: TITLE,
            })]
        );
    }
}
