//! HTTP error payloads and mapping from domain and gateway errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`] into Actix responses here.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode, ValidationErrors};
use crate::outbound::persistence::RepositoryError;

/// Standard error envelope returned by HTTP handlers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "Owner not found")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Map a failed blocking-pool handoff to an internal error.
    pub(crate) fn from_blocking(err: actix_web::error::BlockingError) -> Self {
        error!(error = %err, "blocking task failed");
        DomainError::internal("internal server error").into()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code(),
            message: value.message().to_owned(),
            details: value.details().cloned(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        DomainError::from(value).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if matches!(self.code, ErrorCode::InternalError) {
            let mut redacted = self.clone();
            redacted.message = "internal server error".to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a gateway failure on a read or write to a domain error,
/// attributing not-found to the named entity.
pub(crate) fn map_repo_error(error: RepositoryError, entity: &'static str) -> DomainError {
    match error {
        RepositoryError::NotFound => DomainError::not_found(format!("{entity} not found")),
        RepositoryError::ForeignKey { message } => {
            DomainError::invalid_request("referenced record does not exist")
                .with_details(serde_json::json!({ "constraint": message }))
        }
        RepositoryError::Connection { message } | RepositoryError::Query { message } => {
            error!(entity, message, "persistence failure");
            DomainError::internal("internal server error")
        }
    }
}

/// Map a gateway failure on a delete. A foreign-key rejection means the
/// row still has dependents, which is a conflict rather than a bad
/// reference.
pub(crate) fn map_delete_error(error: RepositoryError, entity: &'static str) -> DomainError {
    match error {
        RepositoryError::ForeignKey { .. } => {
            DomainError::conflict(format!("{entity} still has dependent records"))
        }
        other => map_repo_error(other, entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(DomainError::conflict("busy"), StatusCode::CONFLICT)]
    #[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_statuses(#[case] domain: DomainError, #[case] status: StatusCode) {
        let api = ApiError::from(domain);

        assert_eq!(api.status_code(), status);
    }

    #[rstest]
    fn internal_errors_are_redacted_in_responses() {
        let api = ApiError::from(DomainError::internal("connection string leaked"));

        let response = api.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The redacted body replaces the original message.
        assert_eq!(api.message(), "connection string leaked");
    }

    #[rstest]
    fn not_found_is_attributed_to_the_entity() {
        let domain = map_repo_error(RepositoryError::NotFound, "Trainer");

        assert_eq!(domain.message(), "Trainer not found");
        assert_eq!(domain.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn delete_foreign_key_failures_become_conflicts() {
        let domain = map_delete_error(
            RepositoryError::ForeignKey {
                message: "FOREIGN KEY constraint failed".into(),
            },
            "Owner",
        );

        assert_eq!(domain.code(), ErrorCode::Conflict);
    }

    #[rstest]
    fn query_failures_become_internal_errors() {
        let domain = map_repo_error(
            RepositoryError::Query {
                message: "syntax error".into(),
            },
            "Owner",
        );

        assert_eq!(domain.code(), ErrorCode::InternalError);
    }
}
