use crate::app::render::{self, OutputFormat};
use crate::core::aggregator::Aggregator;
use crate::core::query::ResultSet;
use crate::domain::model::{CaseMode, SearchReport, SortKey};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  search <query> [page]   fetch postings from every source
  sort <title|location|salary>
  filter [keyword]        show postings containing keyword (empty shows all)
  show                    show every posting in the current order
  sources                 per-source results of the last search
  help
  quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { query: String, page: u32 },
    Sort(SortKey),
    Filter(String),
    Show,
    Sources,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ScoutError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let invalid = |reason: &str| ScoutError::InvalidCommand {
            input: line.to_string(),
            reason: reason.to_string(),
        };

        match name.to_lowercase().as_str() {
            "search" => {
                let mut words: Vec<&str> = rest.split_whitespace().collect();
                // 最後一個字是數字才當作頁碼
                let page = match words.last() {
                    Some(last) if words.len() > 1 && last.chars().all(|c| c.is_ascii_digit()) => {
                        let page = validation::parse_page(last);
                        words.pop();
                        page
                    }
                    _ => validation::DEFAULT_PAGE,
                };
                if words.is_empty() {
                    return Err(invalid("search needs a query"));
                }
                Ok(Command::Search {
                    query: words.join(" "),
                    page,
                })
            }
            "sort" => rest
                .parse::<SortKey>()
                .map(Command::Sort)
                .map_err(|reason| invalid(&reason)),
            "filter" => Ok(Command::Filter(rest.to_string())),
            "show" => Ok(Command::Show),
            "sources" => Ok(Command::Sources),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(invalid("unknown command")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// 互動模式的狀態：最近一次搜尋結果與目前的排序鍵
pub struct Session {
    aggregator: Aggregator,
    results: ResultSet,
    case: CaseMode,
    format: OutputFormat,
    last_report: Option<SearchReport>,
}

impl Session {
    pub fn new(
        aggregator: Aggregator,
        sort: SortKey,
        case: CaseMode,
        format: OutputFormat,
    ) -> Self {
        let mut results = ResultSet::default();
        results.sort(sort, case);
        Self {
            aggregator,
            results,
            case,
            format,
            last_report: None,
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        let output = match command {
            Command::Search { query, page } => {
                let report = self.aggregator.search(&query, page).await;
                self.results.replace(report.postings.clone(), self.case);
                let summary = render::render_source_summary(&report);
                self.last_report = Some(report);
                format!("{}{}", render::render(self.results.postings(), self.format)?, summary)
            }
            Command::Sort(key) => {
                self.results.sort(key, self.case);
                render::render(self.results.postings(), self.format)?
            }
            Command::Filter(keyword) => render::render(self.results.filtered(&keyword), self.format)?,
            Command::Show => render::render(self.results.postings(), self.format)?,
            Command::Sources => match &self.last_report {
                Some(report) => render::render_source_summary(report),
                None => "No search yet\n".to_string(),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(output))
    }

    /// 逐行讀取指令直到 quit 或輸入結束
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(HELP.as_bytes()).await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let reply = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await,
                Err(e) => Err(e),
            };

            match reply {
                Ok(Reply::Output(text)) => output.write_all(text.as_bytes()).await?,
                Ok(Reply::Quit) => break,
                Err(e) => {
                    tracing::debug!("Command failed: {}", e);
                    let message = format!("{}\n", e.user_friendly_message());
                    output.write_all(message.as_bytes()).await?;
                }
            }
            output.flush().await?;
        }

        output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{JobPosting, Source, SourceYield};
    use crate::domain::ports::JobSource;
    use async_trait::async_trait;

    struct FixedSource(Source, Vec<(&'static str, &'static str, &'static str)>);

    #[async_trait]
    impl JobSource for FixedSource {
        fn source(&self) -> Source {
            self.0
        }

        async fn fetch(&self, _query: &str, _page: u32) -> Result<SourceYield> {
            Ok(SourceYield {
                source: self.0,
                postings: self
                    .1
                    .iter()
                    .map(|(title, location, salary)| JobPosting {
                        title: title.to_string(),
                        location: location.to_string(),
                        salary: salary.to_string(),
                        source: self.0,
                    })
                    .collect(),
                skipped: Vec::new(),
            })
        }
    }

    fn session() -> Session {
        let aggregator = Aggregator::new(vec![
            Box::new(FixedSource(
                Source::GraduateJobs,
                vec![("Web Developer", "London", "£30,000")],
            )),
            Box::new(FixedSource(
                Source::Reed,
                vec![
                    ("Civil Engineer", "Bristol", "£42,000"),
                    ("Accountant", "Manchester", "N/A"),
                ],
            )),
        ]);
        Session::new(aggregator, SortKey::Title, CaseMode::Sensitive, OutputFormat::Text)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "search software engineer 2".parse::<Command>().unwrap(),
            Command::Search {
                query: "software engineer".to_string(),
                page: 2
            }
        );
        assert_eq!(
            "search 2".parse::<Command>().unwrap(),
            Command::Search {
                query: "2".to_string(),
                page: 1
            }
        );
        assert_eq!(
            "search nurse 0".parse::<Command>().unwrap(),
            Command::Search {
                query: "nurse".to_string(),
                page: 1
            }
        );
        assert_eq!("SORT salary".parse::<Command>().unwrap(), Command::Sort(SortKey::Salary));
        assert_eq!("filter".parse::<Command>().unwrap(), Command::Filter(String::new()));
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_invalid_commands() {
        assert!(matches!(
            "search".parse::<Command>(),
            Err(ScoutError::InvalidCommand { .. })
        ));
        assert!(matches!(
            "sort company".parse::<Command>(),
            Err(ScoutError::InvalidCommand { .. })
        ));
        assert!(matches!(
            "fetch rust".parse::<Command>(),
            Err(ScoutError::InvalidCommand { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_sorts_by_current_key() {
        let mut session = session();
        session
            .execute(Command::Search {
                query: "any".to_string(),
                page: 1,
            })
            .await
            .unwrap();

        let titles: Vec<&str> = session
            .results()
            .postings()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Accountant", "Civil Engineer", "Web Developer"]);
    }

    #[tokio::test]
    async fn test_run_filters_against_full_result_set() {
        let mut session = session();
        let input: &[u8] = b"search dev\nfilter london\nfilter engineer\n\nbogus\nquit\nshow\n";
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Web Developer\nLocation: London\n"));
        assert!(output.contains("Civil Engineer\nLocation: Bristol\n"));
        assert!(output.contains("Graduate Jobs: 1 postings, 0 skipped"));
        assert!(output.contains("'bogus': unknown command"));
        // quit 之後的指令不會執行
        assert_eq!(output.matches("Accountant").count(), 1);
    }
}
