use crate::api::{Category, FoodPost, User};
use crate::client::toasts::Toast;

use super::format::{
    avatar_initial, card_image_url, format_date, format_posted, image_url, pickup_window,
};

pub struct FoodCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub pickup_location: String,
    pub image_url: String,
    pub posted: String,
}

impl FoodCard {
    pub fn from_post(base_url: &str, post: &FoodPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            pickup_location: post.pickup_location.clone(),
            image_url: card_image_url(base_url, post),
            posted: format_posted(post.created_at.as_deref()),
        }
    }
}

/// The post grid. No cards means the "no posts" placeholder is shown.
pub struct FoodGrid {
    pub cards: Vec<FoodCard>,
    pub loading: bool,
}

impl FoodGrid {
    pub fn new(base_url: &str, posts: &[FoodPost], loading: bool) -> Self {
        Self {
            cards: posts.iter().map(|p| FoodCard::from_post(base_url, p)).collect(),
            loading,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub struct FoodDetailView {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub category: String,
    pub quantity: String,
    pub expiry: String,
    pub pickup_location: String,
    pub pickup_window: Option<String>,
    pub description: String,
    pub avatar: String,
    pub username: String,
    pub city: String,
    pub can_claim: bool,
}

impl FoodDetailView {
    /// `viewer` decides whether the claim button is offered: only to a
    /// logged-in user who does not own the post.
    pub fn new(base_url: &str, post: &FoodPost, viewer: Option<&User>) -> Self {
        let username = post
            .user
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_default();
        let can_claim = viewer.is_some_and(|v| post.owner_id() != Some(v.id));

        Self {
            id: post.id,
            title: post.title.clone(),
            image_url: post
                .detail_image()
                .map(|img| image_url(base_url, &img.image_path)),
            category: post
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "No category".to_string()),
            quantity: post
                .quantity
                .clone()
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| "Not specified".to_string()),
            expiry: post
                .expiry_date
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(format_date)
                .unwrap_or_else(|| "No expiry date".to_string()),
            pickup_location: post.pickup_location.clone(),
            pickup_window: pickup_window(
                post.pickup_time_start.as_deref(),
                post.pickup_time_end.as_deref(),
            ),
            description: post.description.clone(),
            avatar: avatar_initial(&username),
            city: post
                .poster_city()
                .filter(|c| !c.is_empty())
                .unwrap_or("Location not specified")
                .to_string(),
            username,
            can_claim,
        }
    }
}

pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One `<option>` per category; `selected` marks the option matching the
/// control's current value.
pub fn category_options(categories: &[Category], current: &str) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| {
            let value = c.id.to_string();
            CategoryOption {
                selected: value == current.trim(),
                value,
                label: c.name.clone(),
            }
        })
        .collect()
}

pub struct ToastView {
    pub id: u64,
    pub message: String,
    pub class: &'static str,
}

impl From<&Toast> for ToastView {
    fn from(toast: &Toast) -> Self {
        Self {
            id: toast.id,
            message: toast.message.clone(),
            class: toast.kind.css_class(),
        }
    }
}
