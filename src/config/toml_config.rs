use crate::config::{
    DEFAULT_ARCHIVE_NAME, DEFAULT_CONCURRENT_READS, DEFAULT_MAX_GROUP_SIZE, DEFAULT_OUTPUT_PATH,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CombineError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub combine: Option<CombineConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,

    /// `input.files` joined onto `input.base_dir`.
    #[serde(skip)]
    resolved_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub files: Vec<String>,
    pub base_dir: Option<String>,
    pub concurrent_reads: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    pub max_group_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub archive_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CombineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| CombineError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolve_input_files();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${HERO_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {e}"))
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    fn resolve_input_files(&mut self) {
        self.resolved_files = match &self.input.base_dir {
            Some(base) => self
                .input
                .files
                .iter()
                .map(|file| Path::new(base).join(file).to_string_lossy().into_owned())
                .collect(),
            None => self.input.files.clone(),
        };
    }

    pub fn set_max_group_size(&mut self, max_group_size: usize) {
        self.combine
            .get_or_insert(CombineConfig {
                max_group_size: None,
            })
            .max_group_size = Some(max_group_size);
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        if let Some(base) = &self.input.base_dir {
            validation::validate_path("input.base_dir", base)?;
        }
        for file in &self.input.files {
            validation::validate_path("input.files", file)?;
        }
        validation::validate_request(self.resolved_files.len(), self.max_group_size())?;
        validation::validate_output(
            self.output_path(),
            self.archive_name(),
            self.concurrent_reads(),
        )
    }
}

impl ConfigProvider for TomlConfig {
    fn input_files(&self) -> &[String] {
        &self.resolved_files
    }

    fn max_group_size(&self) -> usize {
        self.combine
            .as_ref()
            .and_then(|c| c.max_group_size)
            .unwrap_or(DEFAULT_MAX_GROUP_SIZE)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn archive_name(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.archive_name.as_deref())
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
    }

    fn concurrent_reads(&self) -> usize {
        self.input.concurrent_reads.unwrap_or(DEFAULT_CONCURRENT_READS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
