use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Every store or input failure is classified into one of these kinds
/// before it reaches the transport boundary; handlers never return raw
/// sqlx errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    /// Classify a sqlx error: a unique-constraint violation becomes a
    /// `Conflict` carrying `message`; anything else stays `Storage`.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict(message.to_string())
            }
            other => ApiError::Storage(other.into()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Storage(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Storage(e) => {
                error!(error = ?e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let res = ApiError::Validation("missing field".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let res = ApiError::Conflict("email taken".into()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ApiError::NotFound("no such user".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_maps_to_500_and_hides_detail() {
        let res = ApiError::Storage(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_unique_sqlx_error_stays_storage() {
        let err = ApiError::conflict_on_unique(sqlx::Error::RowNotFound, "email taken");
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
