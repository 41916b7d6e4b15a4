use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use crate::render::IndexTemplate;
use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// Every action answers with this so a reload never resubmits a form.
pub fn back_home() -> Redirect {
    Redirect::to("/")
}

pub async fn index(State(state): State<AppState>) -> Html<IndexTemplate> {
    let snapshot = state.controller.snapshot().await;
    Html(IndexTemplate::from_snapshot(
        &snapshot,
        &state.config.backend.base_url,
        state.config.toast_ttl().as_millis(),
    ))
}
