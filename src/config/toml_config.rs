use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::{graduate_jobs, jobs_ac_uk, reed};
use crate::app::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::domain::model::{CaseMode, Source, SortKey};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub http: HttpConfig,
    pub fetch: FetchConfig,
    pub sources: SourcesConfig,
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub concurrent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub graduate_jobs: SiteConfig,
    pub reed: SiteConfig,
    pub jobs_ac_uk: SiteConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            graduate_jobs: SiteConfig::new(graduate_jobs::DEFAULT_BASE_URL),
            reed: SiteConfig::new(reed::DEFAULT_BASE_URL),
            jobs_ac_uk: SiteConfig::new(jobs_ac_uk::DEFAULT_BASE_URL),
        }
    }
}

/// `enabled` 與 `base_url` 缺省時分別為 true 與該網站的正式網址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub base_url: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SiteConfig {
    fn new(base_url: &str) -> Self {
        Self {
            enabled: true,
            base_url: Some(base_url.to_string()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub sort: SortKey,
    pub case_sensitive: bool,
    pub format: OutputFormat,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            sort: SortKey::Title,
            case_sensitive: true,
            format: OutputFormat::Text,
        }
    }
}

impl ScoutConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| ScoutError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${REED_BASE_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ScoutError::config(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn site(&self, source: Source) -> &SiteConfig {
        match source {
            Source::GraduateJobs => &self.sources.graduate_jobs,
            Source::Reed => &self.sources.reed,
            Source::JobsAcUk => &self.sources.jobs_ac_uk,
        }
    }

    pub fn case_mode(&self) -> CaseMode {
        CaseMode::from_sensitive(self.presentation.case_sensitive)
    }

    fn default_base_url(source: Source) -> &'static str {
        match source {
            Source::GraduateJobs => graduate_jobs::DEFAULT_BASE_URL,
            Source::Reed => reed::DEFAULT_BASE_URL,
            Source::JobsAcUk => jobs_ac_uk::DEFAULT_BASE_URL,
        }
    }
}

impl ConfigProvider for ScoutConfig {
    fn base_url(&self, source: Source) -> &str {
        self.site(source)
            .base_url
            .as_deref()
            .unwrap_or_else(|| Self::default_base_url(source))
    }

    fn source_enabled(&self, source: Source) -> bool {
        self.site(source).enabled
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.http.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.http.user_agent
    }

    fn concurrent(&self) -> bool {
        self.fetch.concurrent
    }
}

impl Validate for ScoutConfig {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        validation::validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        let mut enabled = 0;
        for source in Source::ALL {
            if !self.source_enabled(source) {
                continue;
            }
            enabled += 1;
            let field = format!("sources.{}.base_url", source_key(source));
            validation::validate_url(&field, self.base_url(source))?;
        }

        if enabled == 0 {
            return Err(ScoutError::config("at least one source must be enabled"));
        }
        Ok(())
    }
}

fn source_key(source: Source) -> &'static str {
    match source {
        Source::GraduateJobs => "graduate_jobs",
        Source::Reed => "reed",
        Source::JobsAcUk => "jobs_ac_uk",
    }
}
