use crate::adapters::{graduate_jobs, jobs_ac_uk, reed};
use crate::adapters::{GraduateJobsSource, HtmlFetcher, JobsAcUkSource, ReedSource};
use crate::core::{ConfigProvider, JobSource, Result};
use crate::domain::model::{SearchReport, Source, SourceReport, SourceStatus, SourceYield};
use futures::future::join_all;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    #[default]
    Sequential,
    Concurrent,
}

/// 依固定順序查詢所有來源並串接結果
pub struct Aggregator {
    sources: Vec<Box<dyn JobSource>>,
    mode: FetchMode,
}

impl Aggregator {
    pub fn new(sources: Vec<Box<dyn JobSource>>) -> Self {
        Self {
            sources,
            mode: FetchMode::Sequential,
        }
    }

    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    /// 三個網站的預設組合，依 Graduate Jobs、Reed、Jobs.ac.uk 順序
    pub fn with_default_sources() -> Result<Self> {
        let fetcher = HtmlFetcher::new(crate::adapters::http::DEFAULT_USER_AGENT, None)?;
        Ok(Self::new(vec![
            Box::new(GraduateJobsSource::new(
                fetcher.clone(),
                graduate_jobs::DEFAULT_BASE_URL,
            )),
            Box::new(ReedSource::new(fetcher.clone(), reed::DEFAULT_BASE_URL)),
            Box::new(JobsAcUkSource::new(fetcher, jobs_ac_uk::DEFAULT_BASE_URL)),
        ]))
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let fetcher = HtmlFetcher::new(config.user_agent(), config.timeout_seconds())?;

        let mut sources: Vec<Box<dyn JobSource>> = Vec::new();
        for source in Source::ALL {
            if !config.source_enabled(source) {
                tracing::info!("Source {} disabled by configuration", source);
                continue;
            }
            let base_url = config.base_url(source).to_string();
            let adapter: Box<dyn JobSource> = match source {
                Source::GraduateJobs => {
                    Box::new(GraduateJobsSource::new(fetcher.clone(), base_url))
                }
                Source::Reed => Box::new(ReedSource::new(fetcher.clone(), base_url)),
                Source::JobsAcUk => Box::new(JobsAcUkSource::new(fetcher.clone(), base_url)),
            };
            sources.push(adapter);
        }

        let mode = if config.concurrent() {
            FetchMode::Concurrent
        } else {
            FetchMode::Sequential
        };
        Ok(Self::new(sources).with_mode(mode))
    }

    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.sources.iter().map(|s| s.source())
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// 搜尋所有來源。單一來源失敗只記錄在報告中，不影響其他來源
    pub async fn search(&self, query: &str, page: u32) -> SearchReport {
        tracing::info!(
            "🔍 Searching {} sources for '{}' (page {}, {:?})",
            self.sources.len(),
            query,
            page,
            self.mode
        );

        let outcomes = match self.mode {
            FetchMode::Sequential => {
                let mut outcomes = Vec::with_capacity(self.sources.len());
                for adapter in &self.sources {
                    outcomes.push(adapter.fetch(query, page).await);
                }
                outcomes
            }
            // join_all 保留輸入順序
            FetchMode::Concurrent => {
                join_all(self.sources.iter().map(|adapter| adapter.fetch(query, page))).await
            }
        };

        let mut postings = Vec::new();
        let mut reports = Vec::with_capacity(outcomes.len());

        for (adapter, outcome) in self.sources.iter().zip(outcomes) {
            let source = adapter.source();
            match outcome {
                Ok(SourceYield {
                    postings: found,
                    skipped,
                    ..
                }) => {
                    for reason in &skipped {
                        tracing::debug!("{}: skipped listing, {}", source, reason);
                    }
                    tracing::info!(
                        "✅ {}: {} postings, {} listings skipped",
                        source,
                        found.len(),
                        skipped.len()
                    );
                    reports.push(SourceReport {
                        source,
                        status: SourceStatus::Fetched {
                            yielded: found.len(),
                            skipped: skipped.len(),
                        },
                    });
                    postings.extend(found);
                }
                Err(e) => {
                    tracing::warn!("❌ {} failed: {}", source, e);
                    reports.push(SourceReport {
                        source,
                        status: SourceStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        tracing::info!("📋 Collected {} postings in total", postings.len());

        SearchReport {
            query: query.to_string(),
            page,
            fetched_at: chrono::Utc::now(),
            postings,
            sources: reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Field, JobPosting, SkipReason};
    use crate::utils::error::ScoutError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct StubSource {
        source: Source,
        titles: Vec<&'static str>,
        skipped: usize,
        fail: bool,
        calls: Arc<Mutex<Vec<(String, u32)>>>,
    }

    impl StubSource {
        fn new(source: Source, titles: Vec<&'static str>) -> Self {
            Self {
                source,
                titles,
                skipped: 0,
                fail: false,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn with_skipped(mut self, skipped: usize) -> Self {
            self.skipped = skipped;
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }
    }

    #[async_trait]
    impl JobSource for StubSource {
        fn source(&self) -> Source {
            self.source
        }

        async fn fetch(&self, query: &str, page: u32) -> Result<SourceYield> {
            self.calls.lock().unwrap().push((query.to_string(), page));
            if self.fail {
                return Err(ScoutError::Status {
                    source_site: self.source,
                    status: reqwest::StatusCode::BAD_GATEWAY,
                });
            }
            Ok(SourceYield {
                source: self.source,
                postings: self
                    .titles
                    .iter()
                    .map(|title| JobPosting {
                        title: title.to_string(),
                        location: "Remote".to_string(),
                        salary: "N/A".to_string(),
                        source: self.source,
                    })
                    .collect(),
                skipped: vec![
                    SkipReason::EmptyField {
                        field: Field::Salary
                    };
                    self.skipped
                ],
            })
        }
    }

    fn titles(report: &SearchReport) -> Vec<&str> {
        report.postings.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_concatenates_in_source_order() {
        let aggregator = Aggregator::new(vec![
            Box::new(StubSource::new(Source::GraduateJobs, vec!["a1", "a2"])),
            Box::new(StubSource::new(Source::Reed, vec!["b1"]).with_skipped(2)),
            Box::new(StubSource::new(Source::JobsAcUk, vec!["c1", "c2", "c3"])),
        ]);

        let report = aggregator.search("rust", 1).await;

        assert_eq!(titles(&report), vec!["a1", "a2", "b1", "c1", "c2", "c3"]);
        assert_eq!(report.skipped_total(), 2);
        assert_eq!(
            report.sources[1].status,
            SourceStatus::Fetched {
                yielded: 1,
                skipped: 2
            }
        );
    }

    #[tokio::test]
    async fn test_concurrent_mode_keeps_order() {
        let aggregator = Aggregator::new(vec![
            Box::new(StubSource::new(Source::GraduateJobs, vec!["a1"])),
            Box::new(StubSource::new(Source::Reed, vec!["b1", "b2"])),
            Box::new(StubSource::new(Source::JobsAcUk, vec!["c1"])),
        ])
        .with_mode(FetchMode::Concurrent);

        let report = aggregator.search("rust", 1).await;

        assert_eq!(titles(&report), vec!["a1", "b1", "b2", "c1"]);
    }

    #[tokio::test]
    async fn test_failed_source_does_not_abort_search() {
        let reed = StubSource::new(Source::Reed, vec!["b1"]).failing();
        let calls = reed.calls.clone();
        let aggregator = Aggregator::new(vec![
            Box::new(StubSource::new(Source::GraduateJobs, vec!["a1"])),
            Box::new(reed),
            Box::new(StubSource::new(Source::JobsAcUk, vec!["c1"])),
        ]);

        let report = aggregator.search("nurse", 4).await;

        assert_eq!(titles(&report), vec!["a1", "c1"]);
        assert_eq!(calls.lock().unwrap().as_slice(), &[("nurse".to_string(), 4)]);
        let failed: Vec<_> = report.failed_sources().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].source, Source::Reed);
    }

    #[test]
    fn test_default_sources_follow_fixed_order() {
        let aggregator = Aggregator::with_default_sources().unwrap();
        assert_eq!(aggregator.sources().collect::<Vec<_>>(), Source::ALL.to_vec());
        assert_eq!(aggregator.mode(), FetchMode::Sequential);
    }

    #[tokio::test]
    async fn test_all_sources_empty_gives_empty_report() {
        let aggregator = Aggregator::new(vec![
            Box::new(StubSource::new(Source::GraduateJobs, vec![]).failing()),
            Box::new(StubSource::new(Source::Reed, vec![])),
        ]);

        let report = aggregator.search("astronaut", 1).await;

        assert!(report.into_postings().is_empty());
    }
}
