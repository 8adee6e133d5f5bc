use crate::core::matcher::DEFAULT_LIMIT;
use crate::core::{ConfigProvider, PreferenceSet};
use crate::utils::error::{GuideError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "disease_food_guide.csv";

/// Optional configuration file; every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub preferences: PreferenceSet,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// External CSV; the built-in table is used when unset.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy: false,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_file_name() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            file_name: default_file_name(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub verbose: bool,
}

impl GuideConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GuideError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GuideError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIET_GUIDE_DATA})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GuideError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for GuideConfig {
    fn dataset_path(&self) -> Option<&str> {
        self.dataset.path.as_deref()
    }

    fn use_fuzzy(&self) -> bool {
        self.search.fuzzy
    }

    fn limit(&self) -> usize {
        self.search.limit
    }

    fn preferences(&self) -> PreferenceSet {
        self.preferences
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }
}

impl Validate for GuideConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.dataset.path {
            validate_path("dataset.path", path)?;
        }
        validate_positive_number("search.limit", self.search.limit, 1)?;
        validate_path("export.output_path", &self.export.output_path)?;
        validate_file_extension("export.file_name", &self.export.file_name, &["csv"])?;
        Ok(())
    }
}
