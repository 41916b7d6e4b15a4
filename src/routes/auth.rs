use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::client::{LoginForm, Modal, RegisterForm, View};
use crate::error::{AppError, AppResult};
use crate::routes::home::back_home;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/sections/{name}", get(show_section))
        .route("/modals/{name}/open", get(open_modal))
        .route("/modals/{name}/close", get(close_modal))
}

// --- Handlers ---

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Redirect {
    // Failures are already surfaced as toasts.
    if let Err(e) = state.controller.login(form).await {
        tracing::debug!("login failed: {}", e);
    }
    back_home()
}

async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Redirect {
    if let Err(e) = state.controller.register(form).await {
        tracing::debug!("registration failed: {}", e);
    }
    back_home()
}

async fn logout(State(state): State<AppState>) -> Redirect {
    state.controller.logout().await;
    back_home()
}

async fn show_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Redirect> {
    let view = View::from_name(&name).ok_or(AppError::NotFound)?;
    state.controller.show_section(view).await;
    Ok(back_home())
}

async fn open_modal(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Redirect> {
    let modal = Modal::from_name(&name).ok_or(AppError::NotFound)?;
    state.controller.open_modal(modal).await;
    Ok(back_home())
}

async fn close_modal(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Redirect> {
    let modal = Modal::from_name(&name).ok_or(AppError::NotFound)?;
    state.controller.close_modal(modal).await;
    Ok(back_home())
}
