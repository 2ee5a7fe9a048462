use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Fetch failed for {locator}: {message}")]
    FetchError { locator: String, message: String },

    #[error("Artifact {artifact} for league {league} not found")]
    ArtifactNotFound { league: String, artifact: String },

    #[error("Malformed artifact {artifact}: {message}")]
    MalformedArtifact { artifact: String, message: String },

    #[error("No players from school '{school}' in league {league}")]
    SchoolNotFound { league: String, school: String },

    #[error("Malformed roster table for {team}: {message}")]
    MalformedTable { team: String, message: String },

    #[error("Unsupported league: {value}")]
    UnsupportedLeague { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FetchError { .. } => ErrorCategory::Network,
            EtlError::ArtifactNotFound { .. } | EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::MalformedArtifact { .. }
            | EtlError::SchoolNotFound { .. }
            | EtlError::MalformedTable { .. }
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::UnsupportedLeague { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::FetchError { .. } => ErrorSeverity::Medium,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::FetchError { .. } => {
                "Check network connectivity and the source base_url, then rerun collection".to_string()
            }
            EtlError::ArtifactNotFound { league, .. } => {
                format!("Run the collector for '{}' before generating reports", league)
            }
            EtlError::MalformedArtifact { .. } | EtlError::MalformedTable { .. } => {
                "The upstream page layout may have changed; re-collect and inspect the roster tables"
                    .to_string()
            }
            EtlError::SchoolNotFound { .. } => {
                "Check the school spelling against the league's distribution report".to_string()
            }
            EtlError::UnsupportedLeague { .. } => {
                "Use one of: nfl, nba".to_string()
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the logs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download roster data: {}", self),
            ErrorCategory::Storage => format!("Storage problem: {}", self),
            ErrorCategory::Data => format!("Data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
