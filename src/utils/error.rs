use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Dataset not found: {path}")]
    DatasetNotFound { path: String },

    #[error("Dataset parse error: {message}")]
    DatasetParseError { message: String },

    #[error("No disease named '{name}' in the dataset")]
    NoSuchDisease { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

// CSV 錯誤一律視為資料集格式錯誤
impl From<csv::Error> for GuideError {
    fn from(err: csv::Error) -> Self {
        GuideError::DatasetParseError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GuideError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GuideError::DatasetNotFound { .. } | GuideError::DatasetParseError { .. } => {
                ErrorCategory::Dataset
            }
            GuideError::NoSuchDisease { .. } => ErrorCategory::Lookup,
            GuideError::ConfigError { .. } | GuideError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            GuideError::IoError(_) | GuideError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GuideError::NoSuchDisease { .. } => ErrorSeverity::Low,
            GuideError::DatasetParseError { .. }
            | GuideError::ConfigError { .. }
            | GuideError::InvalidConfigValueError { .. }
            | GuideError::SerializationError(_) => ErrorSeverity::High,
            GuideError::DatasetNotFound { .. } | GuideError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GuideError::DatasetNotFound { .. } => {
                "Check the --dataset path, or omit it to use the built-in table"
            }
            GuideError::DatasetParseError { .. } => {
                "The file must be CSV with columns Disease, Foods_to_Eat, Foods_to_Avoid, Nutritional_Note"
            }
            GuideError::NoSuchDisease { .. } => {
                "Run `diet-guide list` to see the available diseases, or use `search --fuzzy`"
            }
            GuideError::ConfigError { .. } | GuideError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and try again"
            }
            GuideError::IoError(_) => "Check file permissions and available disk space",
            GuideError::SerializationError(_) => "Retry without --json or report the issue",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GuideError::DatasetNotFound { path } => {
                format!("Could not find the dataset file '{}'", path)
            }
            GuideError::DatasetParseError { message } => {
                format!("The dataset could not be read: {}", message)
            }
            GuideError::NoSuchDisease { name } => {
                format!("'{}' is not in the disease list", name)
            }
            GuideError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting {} = '{}' is invalid: {}", field, value, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let missing = GuideError::DatasetNotFound {
            path: "x.csv".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::Critical);
        assert_eq!(missing.category(), ErrorCategory::Dataset);

        let unknown = GuideError::NoSuchDisease {
            name: "Flu".to_string(),
        };
        assert_eq!(unknown.severity(), ErrorSeverity::Low);
        assert!(unknown.user_friendly_message().contains("Flu"));
    }

    #[test]
    fn test_csv_error_becomes_parse_error() {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .from_reader("a,b\n1,2,3\n".as_bytes());
        let err = reader
            .records()
            .find_map(|r| r.err())
            .map(GuideError::from)
            .unwrap();
        assert!(matches!(err, GuideError::DatasetParseError { .. }));
    }
}
