//! Request extractors that reject with the JSON error body.
//!
//! Axum's own `Json`, `Query` and `Path` reject with plain text (and 422 for
//! body type errors); these wrappers render every rejection as
//! `{"error": CODE, "message": text}`.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::bad_request;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection(&rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(&rejection)),
        }
    }
}

/// Malformed or mistyped bodies are validation errors (400); a missing
/// content type or an oversized body keeps its own status.
fn json_rejection(rejection: &JsonRejection) -> Response {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => invalid_request(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            rejection.body_text(),
        ),
        JsonRejection::BytesRejection(_) => invalid_request(rejection.status(), rejection.body_text()),
        _ => bad_request(rejection.body_text()),
    }
}

fn query_rejection(rejection: &QueryRejection) -> Response {
    bad_request(rejection.body_text())
}

fn path_rejection(rejection: &PathRejection) -> Response {
    if rejection.status().is_server_error() {
        return invalid_request(rejection.status(), rejection.body_text());
    }
    bad_request(rejection.body_text())
}

fn invalid_request(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "error": "INVALID_REQUEST",
            "message": message
        })),
    )
        .into_response()
}
