use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid number of files, has to be >= 2 (got {count})")]
    TooFewInputs { count: usize },

    #[error("Invalid max combinations, has to be >= 2 (got {value})")]
    InvalidMaxGroupSize { value: usize },

    #[error("A combination run is already in progress")]
    PipelineBusy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
    Archive,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 對應到 CLI 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CombineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CombineError::ZipError(_) => ErrorCategory::Archive,
            CombineError::IoError(_) => ErrorCategory::Storage,
            CombineError::ConfigError { .. }
            | CombineError::ConfigValidationError { .. }
            | CombineError::InvalidConfigValueError { .. }
            | CombineError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CombineError::TooFewInputs { .. } | CombineError::InvalidMaxGroupSize { .. } => {
                ErrorCategory::Input
            }
            CombineError::PipelineBusy => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Archive => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CombineError::ZipError(_) => "Check free disk space and retry",
            CombineError::IoError(_) => {
                "Check that every input file exists and the output directory is writable"
            }
            CombineError::ConfigError { .. }
            | CombineError::ConfigValidationError { .. }
            | CombineError::InvalidConfigValueError { .. }
            | CombineError::MissingConfigError { .. } => {
                "Fix the configuration value named in the error and run again"
            }
            CombineError::TooFewInputs { .. } => "Select at least two hero files",
            CombineError::InvalidMaxGroupSize { .. } => {
                "Pass a max group size of 2 or more (for example --max-group-size 2)"
            }
            CombineError::PipelineBusy => "Wait for the current run to finish",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CombineError::IoError(e) => format!("Could not read or write a file: {}", e),
            CombineError::ZipError(e) => format!("Could not build the archive: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CombineError>;
