//! HTTP routes translating requests into [`UserService`] calls.
//!
//! | Method | Path                      | Service call              |
//! |--------|---------------------------|---------------------------|
//! | GET    | `/user`                   | `list_users`              |
//! | GET    | `/user/{id}`              | `get_user`                |
//! | POST   | `/user`                   | `create_user`             |
//! | PUT    | `/user`                   | `update_user`             |
//! | DELETE | `/user/{id}`              | `delete_user`             |
//! | GET    | `/distance/{a}/{b}`       | `degrees_of_separation`   |
//!
//! Every failure is rendered as `{"error_type": ..., "message": ...}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ServiceError;
use crate::model::{Deleted, NewUser, Separation, User, UserId, UserList, UserUpdate};
use crate::service::UserService;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_type: String,
    pub message: String,
}

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request could not be decoded (bad JSON, non-integer path segment).
    #[error("{0}")]
    BadRequest(String),

    /// The body could not be buffered, usually because it exceeds the limit.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("No route for '{0}'")]
    UnknownRoute(Uri),

    #[error("Method {method} is not allowed on '{uri}'")]
    MethodNotAllowed { method: Method, uri: Uri },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NullArgument { .. })
            | ApiError::Service(ServiceError::Validation { .. })
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound { .. })
            | ApiError::Service(ServiceError::NotConnected { .. })
            | ApiError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::IdsExhausted) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Service(err) => err.kind(),
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::UnknownRoute(_) => "NotFound",
            ApiError::Body(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "PayloadTooLarge"
            }
            ApiError::Body(_) => "BadRequest",
            ApiError::MethodNotAllowed { .. } => "MethodNotAllowed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error_type: self.kind().to_string(),
            message: self.to_string(),
        };
        warn!(
            status = status.as_u16(),
            error_type = %body.error_type,
            message = %body.message,
            "request failed"
        );
        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Builds the application router around a shared service.
///
/// Each route carries its own method fallback so that a known path hit with
/// the wrong verb still answers with a JSON error body.
pub fn router(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/user",
            get(list_users)
                .post(create_user)
                .put(update_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/user/:user_id",
            get(get_user).delete(delete_user).fallback(method_not_allowed),
        )
        .route(
            "/distance/:user_one/:user_two",
            get(degrees_of_separation).fallback(method_not_allowed),
        )
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn list_users(State(service): State<Arc<UserService>>) -> Json<UserList> {
    Json(service.list_users())
}

async fn get_user(
    State(service): State<Arc<UserService>>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<User> {
    let Path(user_id) = user_id?;
    Ok(Json(service.get_user(user_id)?))
}

async fn create_user(
    State(service): State<Arc<UserService>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<User> {
    let data = parse_body::<NewUser>(&body?)?;
    Ok(Json(service.create_user(data)?))
}

async fn update_user(
    State(service): State<Arc<UserService>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<User> {
    let data = parse_body::<UserUpdate>(&body?)?;
    Ok(Json(service.update_user(data)?))
}

async fn delete_user(
    State(service): State<Arc<UserService>>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Deleted> {
    let Path(user_id) = user_id?;
    Ok(Json(service.delete_user(user_id)?))
}

async fn degrees_of_separation(
    State(service): State<Arc<UserService>>,
    users: Result<Path<(UserId, UserId)>, PathRejection>,
) -> ApiResult<Separation> {
    let Path((user_one, user_two)) = users?;
    Ok(Json(service.degrees_of_separation(user_one, user_two)?))
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::UnknownRoute(uri)
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed { method, uri }
}

/// Decodes a JSON request body. An empty body or a literal `null` is an
/// absent payload, which the service reports as a null argument.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body)
        .map_err(|err| ApiError::BadRequest(format!("Invalid JSON body: {err}")))
}
