//! The client controller: every user action of the marketplace UI.
//!
//! Backend calls never run under a lock. `state` is always locked before
//! `ui` when an operation needs both, and neither guard is held across an
//! `.await` on the backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::api::{
    ApiError, Backend, Category, FoodPost, ImageUpload, LoginRequest, NewFoodPost,
    RegisterRequest, User,
};
use crate::auth::TokenStore;
use crate::client::cache::Cache;
use crate::client::filter::SearchFilter;
use crate::client::preview::{self, Thumbnail};
use crate::client::toasts::Toast;
use crate::client::ui::{Forms, LoginForm, Modal, Modals, RegisterForm, ShareDraft, UiState, View};
use crate::config::Config;

/// Data fetched from the backend plus the logged-in user.
#[derive(Debug, Default)]
pub struct ClientState {
    pub current_user: Option<User>,
    pub categories: Cache<Vec<Category>>,
    pub food_posts: Cache<Vec<FoodPost>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("No image selected")]
    NoImages,

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ActionResult<T = ()> = Result<T, ActionError>;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub toast_ttl: Duration,
    pub login_prompt_delay: Duration,
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            toast_ttl: config.toast_ttl(),
            login_prompt_delay: config.login_prompt_delay(),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything the page needs to render, copied out of the controller.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub current_user: Option<User>,
    pub categories: Vec<Category>,
    pub view: View,
    pub modals: Modals,
    pub posts: Vec<FoodPost>,
    pub loading: bool,
    pub detail: Option<FoodPost>,
    pub preview: Vec<Thumbnail>,
    pub filter: SearchFilter,
    pub forms: Forms,
    pub toasts: Vec<Toast>,
}

#[derive(Clone)]
pub struct Controller {
    backend: Arc<dyn Backend>,
    tokens: Arc<dyn TokenStore>,
    state: Arc<Mutex<ClientState>>,
    ui: Arc<Mutex<UiState>>,
    settings: ControllerSettings,
}

/// Toast text for a failed call: the server's `detail` when it sent one,
/// otherwise `fallback` (or `network_fallback` when the call never got an
/// answer).
fn failure_message(err: &ApiError, fallback: &str, network_fallback: &str) -> String {
    match err {
        ApiError::Status { .. } => err.detail().unwrap_or(fallback).to_string(),
        ApiError::Network(_) | ApiError::Decode(_) => network_fallback.to_string(),
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Controller {
    pub fn new(
        backend: Arc<dyn Backend>,
        tokens: Arc<dyn TokenStore>,
        settings: ControllerSettings,
    ) -> Self {
        let ui = UiState::new(settings.toast_ttl);
        Self {
            backend,
            tokens,
            state: Arc::new(Mutex::new(ClientState::default())),
            ui: Arc::new(Mutex::new(ui)),
            settings,
        }
    }

    /// Startup: categories, session check and the post list, concurrently.
    pub async fn init(&self) {
        let (_, authenticated, _) = tokio::join!(
            self.load_categories(),
            self.check_auth_status(),
            self.load_food_posts()
        );
        tracing::info!("Client ready (authenticated: {})", authenticated);
    }

    // -- Session --

    pub async fn current_user(&self) -> Option<User> {
        self.state.lock().await.current_user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.current_user.is_some()
    }

    /// Resolve the stored token into the current user. A rejected token is
    /// removed from storage.
    pub async fn check_auth_status(&self) -> bool {
        let Some(token) = self.tokens.load() else {
            return false;
        };

        match self.backend.me(&token).await {
            Ok(user) => {
                tracing::info!("Authenticated as {}", user.username);
                self.state.lock().await.current_user = Some(user);
                true
            }
            Err(e) => {
                tracing::warn!("Auth check failed: {}", e);
                if let Err(e) = self.tokens.clear() {
                    tracing::error!("Failed to clear stored token: {}", e);
                }
                self.state.lock().await.current_user = None;
                false
            }
        }
    }

    /// Bearer token for authenticated calls, if someone is logged in.
    async fn session_token(&self) -> Option<String> {
        if !self.is_authenticated().await {
            return None;
        }
        self.tokens.load()
    }

    pub async fn login(&self, form: LoginForm) -> ActionResult {
        let request = LoginRequest {
            username: form.username.clone(),
            password: form.password.clone(),
        };

        let token = match self.backend.login(&request).await {
            Ok(response) => response.access_token,
            Err(e) => {
                let message = failure_message(&e, "Login failed", "Login failed. Please try again.");
                let mut ui = self.ui.lock().await;
                ui.toasts.error(message);
                ui.forms.keep_login(&form);
                return Err(e.into());
            }
        };

        if let Err(e) = self.tokens.save(&token) {
            tracing::error!("Failed to store token: {}", e);
            let mut ui = self.ui.lock().await;
            ui.toasts.error("Login failed. Please try again.");
            ui.forms.keep_login(&form);
            return Err(e.into());
        }

        self.check_auth_status().await;

        let mut ui = self.ui.lock().await;
        ui.modals.close(Modal::Login);
        ui.toasts.success("Login successful!");
        ui.forms.login = LoginForm::default();
        Ok(())
    }

    pub async fn register(&self, form: RegisterForm) -> ActionResult {
        let request = RegisterRequest {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            full_name: form.full_name.clone(),
            city: form.city.clone(),
            bio: form.bio.clone(),
        };

        if let Err(e) = self.backend.register(&request).await {
            let message = failure_message(
                &e,
                "Registration failed",
                "Registration failed. Please try again.",
            );
            let mut ui = self.ui.lock().await;
            ui.toasts.error(message);
            ui.forms.keep_register(&form);
            return Err(e.into());
        }

        {
            let mut ui = self.ui.lock().await;
            ui.modals.close(Modal::Register);
            ui.toasts.success("Account created successfully! Please login.");
            ui.forms.register = RegisterForm::default();
        }

        let ui = Arc::clone(&self.ui);
        let delay = self.settings.login_prompt_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ui.lock().await.modals.show_login();
        });

        Ok(())
    }

    /// Forget the session locally. Safe to call when nobody is logged in.
    pub async fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::error!("Failed to clear stored token: {}", e);
        }
        self.state.lock().await.current_user = None;

        let mut ui = self.ui.lock().await;
        ui.toasts.success("Logged out successfully");
        ui.view = View::Home;
    }

    // -- Data loading --

    pub async fn load_categories(&self) -> ActionResult {
        let ticket = self.state.lock().await.categories.begin();

        match self.backend.categories().await {
            Ok(categories) => {
                tracing::debug!("Loaded {} categories", categories.len());
                self.state.lock().await.categories.apply(ticket, categories);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load categories: {}", e);
                Err(e.into())
            }
        }
    }

    /// Re-pull the full post list and show it in the grid.
    pub async fn load_food_posts(&self) -> ActionResult {
        let ticket = self.state.lock().await.food_posts.begin();
        self.ui.lock().await.listing.start_loading();

        let result = self.backend.food_posts().await;

        match result {
            Ok(posts) => {
                let applied = self
                    .state
                    .lock()
                    .await
                    .food_posts
                    .apply(ticket, posts.clone());
                let mut ui = self.ui.lock().await;
                ui.listing.finish_loading();
                if applied {
                    tracing::debug!("Loaded {} food posts", posts.len());
                    ui.listing.posts = posts;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load food posts: {}", e);
                let mut ui = self.ui.lock().await;
                ui.listing.finish_loading();
                if !e.is_status() {
                    ui.toasts.error("Failed to load food posts");
                }
                Err(e.into())
            }
        }
    }

    pub async fn show_food_detail(&self, post_id: i64) -> ActionResult {
        match self.backend.food_post(post_id).await {
            Ok(post) => {
                let mut ui = self.ui.lock().await;
                ui.detail = Some(post);
                ui.modals.open(Modal::FoodDetail);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load food post {}: {}", post_id, e);
                if !e.is_status() {
                    self.ui
                        .lock()
                        .await
                        .toasts
                        .error("Failed to load food details");
                }
                Err(e.into())
            }
        }
    }

    // -- Actions --

    pub async fn claim_food(&self, post_id: i64) -> ActionResult {
        let Some(token) = self.session_token().await else {
            self.show_login().await;
            return Err(ActionError::NotAuthenticated);
        };

        if let Err(e) = self.backend.claim_food_post(post_id, &token).await {
            let message = failure_message(&e, "Failed to claim food", "Failed to claim food");
            self.ui.lock().await.toasts.error(message);
            return Err(e.into());
        }

        tracing::info!("Claimed food post {}", post_id);
        {
            let mut ui = self.ui.lock().await;
            ui.toasts.success("Food claimed successfully!");
            ui.modals.close(Modal::FoodDetail);
        }
        let _ = self.load_food_posts().await;
        Ok(())
    }

    /// Publish a new post. Refuses to touch the network without a session
    /// or without at least one image.
    ///
    /// The page comes back with an empty file picker whatever the outcome,
    /// so the preview is dropped up front.
    pub async fn share_food(&self, draft: ShareDraft, images: Vec<ImageUpload>) -> ActionResult {
        self.ui.lock().await.preview.clear();

        let Some(token) = self.session_token().await else {
            {
                let mut ui = self.ui.lock().await;
                ui.toasts.error("Please login to share food");
                ui.forms.share = draft;
                ui.modals.show_login();
            }
            return Err(ActionError::NotAuthenticated);
        };

        if images.is_empty() {
            let mut ui = self.ui.lock().await;
            ui.toasts.error("Please select at least one image");
            ui.forms.share = draft;
            return Err(ActionError::NoImages);
        }

        let post = NewFoodPost {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category_id: non_blank(draft.category_id.clone()),
            quantity: non_blank(draft.quantity.clone()),
            expiry_date: non_blank(draft.expiry_date.clone()),
            pickup_location: draft.pickup_location.clone(),
            pickup_time_start: non_blank(draft.pickup_time_start.clone()),
            pickup_time_end: non_blank(draft.pickup_time_end.clone()),
            images,
        };

        if let Err(e) = self.backend.create_food_post(post, &token).await {
            let message = failure_message(&e, "Failed to share food", "Failed to share food");
            let mut ui = self.ui.lock().await;
            ui.toasts.error(message);
            ui.forms.share = draft;
            return Err(e.into());
        }

        tracing::info!("Shared food post {:?}", draft.title);
        {
            let mut ui = self.ui.lock().await;
            ui.toasts.success("Food shared successfully!");
            ui.forms.share = ShareDraft::default();
        }
        let _ = self.load_food_posts().await;
        Ok(())
    }

    /// Replace the preview area with thumbnails of `files`.
    pub async fn preview_images(&self, files: Vec<ImageUpload>) -> Vec<Thumbnail> {
        self.ui.lock().await.preview.clear();
        let thumbs = preview::thumbnails(&files).await;
        self.ui.lock().await.preview = thumbs.clone();
        thumbs
    }

    /// Filter the cached list without a round-trip and show the result.
    pub async fn search(&self, filter: SearchFilter) -> usize {
        let results = {
            let state = self.state.lock().await;
            filter.apply(state.food_posts.get())
        };
        let count = results.len();
        tracing::debug!("Search {:?} matched {} posts", filter, count);

        let mut ui = self.ui.lock().await;
        ui.listing.posts = results;
        ui.filter = filter;
        ui.view = View::Browse;
        count
    }

    // -- Navigation --

    pub async fn show_section(&self, view: View) {
        self.ui.lock().await.view = view;
        if view == View::Browse {
            let _ = self.load_food_posts().await;
        }
    }

    pub async fn open_modal(&self, modal: Modal) {
        let mut ui = self.ui.lock().await;
        match modal {
            Modal::Login => ui.modals.show_login(),
            Modal::Register => ui.modals.show_register(),
            Modal::FoodDetail => ui.modals.open(Modal::FoodDetail),
        }
    }

    pub async fn close_modal(&self, modal: Modal) {
        self.ui.lock().await.modals.close(modal);
    }

    pub async fn show_login(&self) {
        self.ui.lock().await.modals.show_login();
    }

    pub async fn show_register(&self) {
        self.ui.lock().await.modals.show_register();
    }

    pub async fn dismiss_toast(&self, id: u64) -> bool {
        self.ui.lock().await.toasts.dismiss(id)
    }

    pub async fn snapshot(&self) -> Snapshot {
        let (current_user, categories) = {
            let state = self.state.lock().await;
            (state.current_user.clone(), state.categories.get().clone())
        };

        let mut ui = self.ui.lock().await;
        let toasts = ui.toasts.active();
        Snapshot {
            current_user,
            categories,
            view: ui.view,
            modals: ui.modals.clone(),
            posts: ui.listing.posts.clone(),
            loading: ui.listing.is_loading(),
            detail: ui.detail.clone(),
            preview: ui.preview.clone(),
            filter: ui.filter.clone(),
            forms: ui.forms.clone(),
            toasts,
        }
    }
}
