use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShieldError {
    #[error("Rule service request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalogue parsing error: {message}")]
    CatalogParseError { message: String },

    #[error("Rule catalogue for {kind} scans is empty")]
    EmptyCatalog { kind: String },

    #[error("Rule catalogue unavailable from {origin}: {reason}")]
    CatalogUnavailable { origin: String, reason: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Report export error: {message}")]
    ExportError { message: String },

    #[error("Lesson not found: {id}")]
    LessonNotFound { id: String },

    #[error("Quiz not found: {id}")]
    QuizNotFound { id: String },

    #[error("Family member not found: {id}")]
    MemberNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    NotFound,
    System,
}

impl ShieldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShieldError::ApiError(_) | ShieldError::CatalogUnavailable { .. } => {
                ErrorCategory::Network
            }
            ShieldError::CatalogParseError { .. }
            | ShieldError::EmptyCatalog { .. }
            | ShieldError::InvalidConfigValueError { .. }
            | ShieldError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ShieldError::CsvError(_)
            | ShieldError::SerializationError(_)
            | ShieldError::ExportError { .. } => ErrorCategory::Data,
            ShieldError::LessonNotFound { .. }
            | ShieldError::QuizNotFound { .. }
            | ShieldError::MemberNotFound { .. } => ErrorCategory::NotFound,
            ShieldError::ZipError(_) | ShieldError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Detection must fail loudly when the catalogue is broken: a scan
            // that cannot see its rules must never report "safe".
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::NotFound => ErrorSeverity::Low,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ShieldError::ApiError(_) | ShieldError::CatalogUnavailable { .. } => {
                "Check network connectivity and the rules endpoint, or fall back to the bundled catalogue".to_string()
            }
            ShieldError::CatalogParseError { .. } => {
                "Verify the catalogue file is valid TOML/JSON with call, sms, link and qr sections".to_string()
            }
            ShieldError::EmptyCatalog { kind } => {
                format!("Add at least one rule to the {} section of the catalogue", kind)
            }
            ShieldError::InvalidConfigValueError { field, .. }
            | ShieldError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and retry", field)
            }
            ShieldError::LessonNotFound { .. } => {
                "List available lessons with the 'lessons' command".to_string()
            }
            ShieldError::QuizNotFound { .. } => {
                "Check the quiz id against the lesson's quiz".to_string()
            }
            ShieldError::MemberNotFound { .. } => {
                "Check the member id against the family roster".to_string()
            }
            _ => "Retry the operation; if it persists, run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => "Could not reach the rule service".to_string(),
            ErrorCategory::Configuration => {
                "The rule catalogue is missing or invalid; scans were not performed".to_string()
            }
            ErrorCategory::Data => "Failed to produce the requested output".to_string(),
            ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShieldError>;
