//! REST API module.
//!
//! Contains all API routes and handlers following the editor client contract.

mod auth;
mod careers;
mod drafts;
mod jobs;
mod sections;
mod theme;

pub use auth::*;
pub use careers::*;
pub use drafts::*;
pub use jobs::*;
pub use sections::*;
pub use theme::*;

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::models::Normalize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create a `201 Created` API response.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        ..ApiResponse::new(data)
    })
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

/// JSON body that has been normalized and validated.
///
/// Malformed JSON is a `BAD_REQUEST`; rule violations are a
/// `VALIDATION_ERROR` with per-field messages.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, AppError> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let value = value.normalize();
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginRequest;
    use axum::{body::Body, http, routing::post, Router};
    use tower::ServiceExt;

    async fn login_echo(ValidatedJson(request): ValidatedJson<LoginRequest>) -> ApiResult<String> {
        created(request.email)
    }

    async fn call(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(login_echo));
        let response = app
            .oneshot(
                http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_is_normalized() {
        let (status, body) = call(r#"{"email":"  Ada@Acme.Test ","passcode":"secret"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "ada@acme.test");
        assert!(body.get("status").is_none());
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let (status, body) = call(r#"{"email":"nope","passcode":"12"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"]["fields"]["email"].is_array());
        assert!(body["error"]["details"]["fields"]["passcode"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = call("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}
