use crate::domain::model::{JobPosting, SearchReport, SourceStatus};
use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

pub fn render<'a, I>(postings: I, format: OutputFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    match format {
        OutputFormat::Text => Ok(render_text(postings)),
        OutputFormat::Csv => render_csv(postings),
        OutputFormat::Json => render_json(postings),
    }
}

/// 每筆職缺：標題、地點、薪資、來源，之後空一行
pub fn render_text<'a, I>(postings: I) -> String
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    let mut out = String::new();
    for posting in postings {
        let _ = writeln!(out, "{}", posting.title);
        let _ = writeln!(out, "Location: {}", posting.location);
        let _ = writeln!(out, "Salary: {}", posting.salary);
        let _ = writeln!(out, "Source: {}", posting.source);
        out.push('\n');
    }
    out
}

pub fn render_csv<'a, I>(postings: I) -> Result<String>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["title", "location", "salary", "source"])?;
    for posting in postings {
        writer.serialize(posting)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScoutError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ScoutError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn render_json<'a, I>(postings: I) -> Result<String>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    let postings: Vec<&JobPosting> = postings.into_iter().collect();
    Ok(serde_json::to_string_pretty(&postings)?)
}

/// 各來源的抓取摘要
pub fn render_source_summary(report: &SearchReport) -> String {
    let mut out = String::new();
    for source_report in &report.sources {
        match &source_report.status {
            SourceStatus::Fetched { yielded, skipped } => {
                let _ = writeln!(
                    out,
                    "{}: {} postings, {} skipped",
                    source_report.source, yielded, skipped
                );
            }
            SourceStatus::Failed { error } => {
                let _ = writeln!(out, "{}: failed ({})", source_report.source, error);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Source, SourceReport};

    fn postings() -> Vec<JobPosting> {
        vec![
            JobPosting {
                title: "Graduate Engineer".to_string(),
                location: "Leeds".to_string(),
                salary: "£28,000".to_string(),
                source: Source::GraduateJobs,
            },
            JobPosting {
                title: "Lecturer, Physics".to_string(),
                location: "York".to_string(),
                salary: "N/A".to_string(),
                source: Source::JobsAcUk,
            },
        ]
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&postings()[..1]);
        assert_eq!(
            text,
            "Graduate Engineer\nLocation: Leeds\nSalary: £28,000\nSource: Graduate Jobs\n\n"
        );
    }

    #[test]
    fn test_render_csv_quotes_commas() {
        let csv = render(&postings(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "title,location,salary,source");
        assert_eq!(lines[1], "Graduate Engineer,Leeds,\"£28,000\",Graduate Jobs");
        assert_eq!(lines[2], "\"Lecturer, Physics\",York,N/A,Jobs.ac.uk");
    }

    #[test]
    fn test_render_json_array() {
        let json = render(&postings(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["source"], "Jobs.ac.uk");
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render(&Vec::<JobPosting>::new(), OutputFormat::Text).unwrap(), "");
        assert_eq!(render(&Vec::<JobPosting>::new(), OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_source_summary() {
        let report = SearchReport {
            query: "engineer".to_string(),
            page: 1,
            fetched_at: chrono::Utc::now(),
            postings: Vec::new(),
            sources: vec![
                SourceReport {
                    source: Source::Reed,
                    status: SourceStatus::Fetched {
                        yielded: 3,
                        skipped: 1,
                    },
                },
                SourceReport {
                    source: Source::JobsAcUk,
                    status: SourceStatus::Failed {
                        error: "timed out".to_string(),
                    },
                },
            ],
        };

        assert_eq!(
            render_source_summary(&report),
            "Reed: 3 postings, 1 skipped\nJobs.ac.uk: failed (timed out)\n"
        );
    }
}
