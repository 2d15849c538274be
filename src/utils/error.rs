use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Unauthorized: {0}")]
    UnauthorizedError(String),

    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),
}

impl CustomError {
    /// Long tag surfaced in the `error` field of the envelope.
    pub fn error_tag(&self) -> &'static str {
        match *self {
            CustomError::UnauthorizedError(..) => "UNAUTHORIZED_ERROR",
            CustomError::BadRequestError(..) => "BAD_REQUEST_ERROR",
            CustomError::ConflictError(..) => "CONFLICT_ERROR",
            CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
            CustomError::NotFoundError(..) => "NOT_FOUND_ERROR",
            CustomError::ValidationError(..) => "VALIDATION_ERROR",
        }
    }

    /// Short triage code surfaced in the `code` field of the envelope.
    pub fn triage_code(&self) -> &'static str {
        match *self {
            CustomError::UnauthorizedError(..) => "AE",
            CustomError::BadRequestError(..) => "VE",
            CustomError::ConflictError(..) => "DE",
            CustomError::InternalServerError(..) => "CE",
            CustomError::NotFoundError(..) => "NF",
            CustomError::ValidationError(..) => "VE",
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::UnauthorizedError(..) => StatusCode::UNAUTHORIZED,
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::ConflictError(..) => StatusCode::CONFLICT,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::ValidationError(..) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!("[{}] {}", self.triage_code(), self);
        }

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": status_code.as_u16(),
            "error": self.error_tag(),
            "code": self.triage_code(),
            "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            CustomError::BadRequestError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CustomError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CustomError::UnauthorizedError("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CustomError::NotFoundError("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CustomError::ConflictError("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            CustomError::InternalServerError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_error_envelope_carries_triage_code() {
        let err = CustomError::InternalServerError("query failed".into());
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "CE");
        assert_eq!(body["error"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["httpStatusCode"], 500);
        assert!(body["message"].as_str().unwrap().contains("query failed"));
    }

    #[actix_web::test]
    async fn not_found_envelope_uses_nf_code() {
        let err = CustomError::NotFoundError("Post not found".into());
        let res = err.error_response();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NF");
        assert_eq!(body["httpStatusCode"], 404);
    }
}
