use crate::config::toml_config::ScoutConfig;
use crate::config::CliConfig;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};

impl CliConfig {
    /// 載入設定檔 (沒有的話用預設值) 並套用命令列覆蓋
    pub fn load_scout_config(&self) -> Result<ScoutConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                ScoutConfig::from_file(path)?
            }
            None => ScoutConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ScoutConfig) {
        if let Some(sort) = self.sort {
            config.presentation.sort = sort;
        }
        if self.case_insensitive {
            config.presentation.case_sensitive = false;
        }
        if let Some(format) = self.format {
            config.presentation.format = format;
        }
        if self.concurrent {
            config.fetch.concurrent = true;
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = Some(timeout);
        }
    }

    pub fn page_number(&self) -> u32 {
        validation::parse_page(&self.page)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.interactive {
            return Ok(());
        }
        match &self.query {
            Some(query) => validation::validate_non_empty_string("query", query),
            None => Err(ScoutError::config(
                "a search query is required unless --interactive is given",
            )),
        }
    }
}
