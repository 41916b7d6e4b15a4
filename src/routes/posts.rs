use axum::extract::{Multipart, Path, Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;

use crate::api::ImageUpload;
use crate::client::{SearchFilter, ShareDraft};
use crate::error::AppResult;
use crate::render::ImagePreviewTemplate;
use crate::routes::home::{back_home, Html};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/food-posts/{id}", get(show_detail))
        .route("/food-posts/{id}/claim", post(claim))
        .route("/share", post(share))
        .route("/share/preview", post(preview))
        .route("/toasts/{id}/dismiss", post(dismiss_toast))
}

// --- Handlers ---

async fn search(State(state): State<AppState>, Query(filter): Query<SearchFilter>) -> Redirect {
    let matched = state.controller.search(filter).await;
    tracing::debug!("search matched {} posts", matched);
    back_home()
}

async fn show_detail(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    if let Err(e) = state.controller.show_food_detail(id).await {
        tracing::debug!("food post {} not shown: {}", id, e);
    }
    back_home()
}

async fn claim(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    if let Err(e) = state.controller.claim_food(id).await {
        tracing::debug!("claim of food post {} failed: {}", id, e);
    }
    back_home()
}

async fn share(State(state): State<AppState>, multipart: Multipart) -> AppResult<Redirect> {
    let (draft, images) = read_share_form(multipart).await?;
    if let Err(e) = state.controller.share_food(draft, images).await {
        tracing::debug!("share failed: {}", e);
    }
    Ok(back_home())
}

/// Returns only the thumbnail fragment; the browser swaps it in place.
async fn preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Html<ImagePreviewTemplate>> {
    let (_, images) = read_share_form(multipart).await?;
    let preview = state.controller.preview_images(images).await;
    Ok(Html(ImagePreviewTemplate { preview }))
}

async fn dismiss_toast(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    state.controller.dismiss_toast(id).await;
    back_home()
}

// --- Multipart ---

async fn read_share_form(mut multipart: Multipart) -> AppResult<(ShareDraft, Vec<ImageUpload>)> {
    let mut draft = ShareDraft::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field.bytes().await?;
            // An untouched file input still sends one empty part.
            if file_name.is_empty() || data.is_empty() {
                continue;
            }
            images.push(ImageUpload {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field.text().await?;
        let slot = match name.as_str() {
            "title" => &mut draft.title,
            "description" => &mut draft.description,
            "category_id" => &mut draft.category_id,
            "quantity" => &mut draft.quantity,
            "expiry_date" => &mut draft.expiry_date,
            "pickup_location" => &mut draft.pickup_location,
            "pickup_time_start" => &mut draft.pickup_time_start,
            "pickup_time_end" => &mut draft.pickup_time_end,
            other => {
                tracing::debug!("ignoring unknown share field {:?}", other);
                continue;
            }
        };
        *slot = value;
    }

    Ok((draft, images))
}
