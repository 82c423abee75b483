use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 三個職缺網站
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Graduate Jobs")]
    GraduateJobs,
    #[serde(rename = "Reed")]
    Reed,
    #[serde(rename = "Jobs.ac.uk")]
    JobsAcUk,
}

impl Source {
    /// 固定的查詢順序
    pub const ALL: [Source; 3] = [Source::GraduateJobs, Source::Reed, Source::JobsAcUk];

    pub fn display_name(&self) -> &'static str {
        match self {
            Source::GraduateJobs => "Graduate Jobs",
            Source::Reed => "Reed",
            Source::JobsAcUk => "Jobs.ac.uk",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub location: String,
    pub salary: String,
    pub source: Source,
}

impl JobPosting {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Location => &self.location,
            Field::Salary => &self.salary,
        }
    }
}

/// 從列表片段擷取的欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Location,
    Salary,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::Location => f.write_str("location"),
            Field::Salary => f.write_str("salary"),
        }
    }
}

/// 單筆列表被略過的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MissingElement { field: Field, selector: &'static str },
    EmptyField { field: Field },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingElement { field, selector } => {
                write!(f, "no '{}' element for {}", selector, field)
            }
            SkipReason::EmptyField { field } => write!(f, "{} is empty", field),
        }
    }
}

/// 單筆列表的擷取結果
pub type Extraction = std::result::Result<JobPosting, SkipReason>;

/// 一個來源一次抓取的產出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceYield {
    pub source: Source,
    pub postings: Vec<JobPosting>,
    pub skipped: Vec<SkipReason>,
}

impl SourceYield {
    pub fn empty(source: Source) -> Self {
        Self {
            source,
            postings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn from_extractions<I>(source: Source, extractions: I) -> Self
    where
        I: IntoIterator<Item = Extraction>,
    {
        let mut result = Self::empty(source);
        for extraction in extractions {
            match extraction {
                Ok(posting) => result.postings.push(posting),
                Err(reason) => result.skipped.push(reason),
            }
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Fetched { yielded: usize, skipped: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: Source,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. })
    }
}

/// 一次搜尋的完整結果
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub page: u32,
    pub fetched_at: DateTime<Utc>,
    pub postings: Vec<JobPosting>,
    pub sources: Vec<SourceReport>,
}

impl SearchReport {
    pub fn into_postings(self) -> Vec<JobPosting> {
        self.postings
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|report| report.is_failed())
    }

    pub fn skipped_total(&self) -> usize {
        self.sources
            .iter()
            .map(|report| match report.status {
                SourceStatus::Fetched { skipped, .. } => skipped,
                SourceStatus::Failed { .. } => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    #[default]
    Title,
    Location,
    Salary,
}

impl SortKey {
    pub fn field(&self) -> Field {
        match self {
            SortKey::Title => Field::Title,
            SortKey::Location => Field::Location,
            SortKey::Salary => Field::Salary,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "location" => Ok(SortKey::Location),
            "salary" => Ok(SortKey::Salary),
            other => Err(format!(
                "unknown sort key '{}', expected title, location or salary",
                other
            )),
        }
    }
}

/// 排序時是否區分大小寫
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    pub fn from_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        }
    }
}
