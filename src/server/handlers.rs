use super::types::{
    ErrorResponse, ProcessImageRequest, ProcessImageResponse, ProcessQuestionRequest,
    ProcessQuestionResponse,
};
use crate::{Error, narrator::Narrator};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::{io, path::PathBuf, sync::Arc};
use tracing::{error, info, warn};

pub const INDEX_NOT_FOUND: &str = "Index file not found";
pub const GENERIC_INTERNAL_ERROR: &str = "Internal server error";

type Rejection = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub narrator: Arc<Narrator>,
    pub static_dir: Arc<PathBuf>,
    pub expose_error_details: bool,
}

impl AppState {
    /// The one place errors become HTTP responses.
    fn reject(&self, err: Error) -> Rejection {
        let status = err.status_code();

        let detail = if status.is_server_error() {
            error!("Request failed: {}", err);
            if self.expose_error_details {
                err.to_string()
            } else {
                GENERIC_INTERNAL_ERROR.to_string()
            }
        } else {
            warn!("Request rejected with {}: {}", status, err);
            err.to_string()
        };

        (status, Json(ErrorResponse { detail }))
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, Rejection> {
    let path = state.static_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(state.reject(Error::not_found(INDEX_NOT_FOUND)))
        }
        Err(e) => Err(state.reject(e.into())),
    }
}

pub async fn process_image(
    State(state): State<AppState>,
    payload: Result<Json<ProcessImageRequest>, JsonRejection>,
) -> Result<Json<ProcessImageResponse>, Rejection> {
    let Json(request) = payload.map_err(|rejection| state.reject(body_error(rejection)))?;
    info!("Received process-image request");

    match state
        .narrator
        .describe(request.image.as_deref(), request.timestamp)
        .await
    {
        Ok(description) => Ok(Json(ProcessImageResponse { description })),
        Err(e) => Err(state.reject(e)),
    }
}

pub async fn process_question(
    State(state): State<AppState>,
    payload: Result<Json<ProcessQuestionRequest>, JsonRejection>,
) -> Result<Json<ProcessQuestionResponse>, Rejection> {
    let Json(request) = payload.map_err(|rejection| state.reject(body_error(rejection)))?;
    info!("Received process-question request");

    match state
        .narrator
        .answer(
            request.image.as_deref(),
            request.question.as_deref(),
            request.timestamp,
        )
        .await
    {
        Ok(answer) => Ok(Json(ProcessQuestionResponse { answer })),
        Err(e) => Err(state.reject(e)),
    }
}

// Body parsing sits inside the failure boundary, so a malformed body is
// reported like any other unclassified failure.
fn body_error(rejection: JsonRejection) -> Error {
    Error::Body(rejection.body_text())
}
