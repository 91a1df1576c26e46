use crate::domain::DomainError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource not found"),

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::service_unavailable("Database unavailable")
            }

            other => {
                error!("Database error: {:?}", other);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let details = err.to_string();
        let app_error = match err {
            DomainError::InvalidPostId(_) => Self::bad_request("Invalid post id"),
            DomainError::DuplicatedEnrollment { .. } => {
                Self::bad_request("Already enrolled in this gathering")
            }
            DomainError::ExceedParticipantLimit { .. } => {
                Self::bad_request("Participant limit exceeded")
            }
            DomainError::GatheringNotRecruiting { .. } => {
                Self::bad_request("Gathering is not recruiting")
            }
            DomainError::InvalidStatusTransition { .. } => {
                Self::bad_request("Invalid gathering status change")
            }
            DomainError::InvalidParticipantMax { .. } => {
                Self::bad_request("Invalid participant maximum")
            }
            DomainError::NotGatheringOwner { .. } => {
                Self::forbidden("Only the author can change this gathering")
            }
            DomainError::MemberNotFound(_) => Self::not_found("Member not found"),
            DomainError::DataIntegrity(_) => {
                error!("{}", details);
                // details stay in the logs
                return Self::internal_server_error("Internal server error");
            }
            DomainError::Database(db) => return db.into(),
        };
        app_error.with_details(details)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GatheringStatus;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let cases = [
            (DomainError::InvalidPostId(1), StatusCode::BAD_REQUEST),
            (
                DomainError::DuplicatedEnrollment { post_id: 1, member_id: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::ExceedParticipantLimit { post_id: 1, max: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::InvalidStatusTransition {
                    from: GatheringStatus::Deleted,
                    to: GatheringStatus::Gathering,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::NotGatheringOwner { post_id: 1, member_id: 2 },
                StatusCode::FORBIDDEN,
            ),
            (DomainError::MemberNotFound(9), StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_integrity_violation_is_a_server_error_without_details() {
        let err = AppError::from(DomainError::DataIntegrity("enrollment 3".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details.is_none());
    }

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        let err = AppError::from(DomainError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
