use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis request not found")]
    RequestNotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One field-level validation failure, addressed by its wire field path
/// (e.g. `email`, `holdings[0].avgBuyPrice`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn to_error_body(&self) -> ErrorBody {
        let (message, errors) = match self {
            AppError::Validation(errors) => ("Validation failed".to_string(), Some(errors.clone())),
            AppError::InvalidInput(msg) => (msg.clone(), None),
            AppError::RequestNotFound => ("Analysis request not found".to_string(), None),
            AppError::Database(_) => ("Internal server error".to_string(), None),
            AppError::Config(msg) => (msg.clone(), None),
            AppError::Internal(msg) => (msg.clone(), None),
        };

        ErrorBody { message, errors }
    }

    /// Collapses unexpected failures into a 500 with the given public
    /// message, logging the underlying cause. Client-correctable outcomes
    /// (validation, bad input, not found) pass through untouched.
    pub fn or_internal(self, public: &str) -> AppError {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::RequestNotFound => self,
            other => {
                tracing::error!("{}: {}", public, other);
                AppError::Internal(public.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::RequestNotFound => axum::http::StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidInput(_) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = self.to_error_body();
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
