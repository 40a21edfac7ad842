use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Registry request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    /// `field` is `None` for errors that concern the submission as a whole.
    #[error("Validation error: {message}")]
    ValidationError {
        field: Option<String>,
        message: String,
    },

    /// Several fields rejected at once, as `(field, message)` pairs.
    #[error("Validation failed for {} field(s)", .errors.len())]
    FieldErrors { errors: Vec<(String, String)> },

    #[error("{message}")]
    UniqueConstraintError { message: String },

    #[error("{resource} {id} not found")]
    NotFoundError { resource: &'static str, id: i64 },

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("Unsupported media type: {message}")]
    UnsupportedMediaType { message: String },

    #[error("Invalid page.")]
    InvalidPage,

    #[error("Vehicle registry unavailable: {message}")]
    RegistryUnavailable { message: String },
}

impl ServiceError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ServiceError::ValidationError {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        ServiceError::ValidationError {
            field: None,
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::ValidationError { .. }
            | ServiceError::FieldErrors { .. }
            | ServiceError::UniqueConstraintError { .. }
            | ServiceError::MalformedPayload { .. } => 400,
            ServiceError::NotFoundError { .. } | ServiceError::InvalidPage => 404,
            ServiceError::UnsupportedMediaType { .. } => 415,
            ServiceError::RegistryUnavailable { .. } | ServiceError::ApiError(_) => 502,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
