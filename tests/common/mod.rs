//! Scriptable in-process backend shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use foodshare::api::{
    ApiError, ApiResult, Backend, Category, FoodPost, LoginRequest, NewFoodPost, RegisterRequest,
    TokenResponse, User,
};
use foodshare::auth::MemoryTokenStore;
use foodshare::client::{Controller, ControllerSettings};

pub const GOOD_TOKEN: &str = "good-token";

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: Some(format!("{}@example.com", username)),
        full_name: None,
        city: Some("Turin".to_string()),
        bio: None,
    }
}

pub fn post(id: i64, title: &str, owner: i64) -> FoodPost {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "description": format!("{} to give away", title),
        "pickup_location": "Main square",
        "user_id": owner,
        "user": { "id": owner, "username": format!("user{}", owner), "city": "Turin" },
        "category": { "id": 1, "name": "Bakery" },
    }))
    .unwrap()
}

pub fn status_error(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        detail: Some(detail.to_string()),
    }
}

/// A `food_posts` answer held back until the test releases it.
struct Gated {
    gate: Arc<Notify>,
    posts: Vec<FoodPost>,
}

pub struct FakeBackend {
    pub user: Mutex<Option<User>>,
    /// When set, `/me` fails with this regardless of the token.
    pub me_error: Mutex<Option<ApiError>>,
    pub login_result: Mutex<ApiResult<TokenResponse>>,
    pub register_result: Mutex<ApiResult<()>>,
    pub claim_result: Mutex<ApiResult<()>>,
    pub create_result: Mutex<ApiResult<()>>,
    pub categories: Mutex<ApiResult<Vec<Category>>>,
    pub posts: Mutex<ApiResult<Vec<FoodPost>>>,
    gated: Mutex<Option<Gated>>,
    pub created: Mutex<Vec<NewFoodPost>>,
    pub me_calls: AtomicUsize,
    pub food_posts_calls: AtomicUsize,
    pub claim_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            user: Mutex::new(Some(user(1, "alice"))),
            me_error: Mutex::new(None),
            login_result: Mutex::new(Ok(TokenResponse {
                access_token: GOOD_TOKEN.to_string(),
                token_type: Some("bearer".to_string()),
            })),
            register_result: Mutex::new(Ok(())),
            claim_result: Mutex::new(Ok(())),
            create_result: Mutex::new(Ok(())),
            categories: Mutex::new(Ok(vec![
                Category {
                    id: 1,
                    name: "Bakery".to_string(),
                    description: None,
                },
                Category {
                    id: 2,
                    name: "Produce".to_string(),
                    description: None,
                },
            ])),
            posts: Mutex::new(Ok(Vec::new())),
            gated: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            me_calls: AtomicUsize::new(0),
            food_posts_calls: AtomicUsize::new(0),
            claim_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeBackend {
    pub fn with_posts(posts: Vec<FoodPost>) -> Self {
        let backend = Self::default();
        *backend.posts.lock().unwrap() = Ok(posts);
        backend
    }

    pub fn set_posts(&self, posts: Vec<FoodPost>) {
        *self.posts.lock().unwrap() = Ok(posts);
    }

    /// The next `food_posts` call answers `posts`, but only once `gate` is
    /// notified.
    pub fn hold_next_food_posts(&self, gate: Arc<Notify>, posts: Vec<FoodPost>) {
        *self.gated.lock().unwrap() = Some(Gated { gate, posts });
    }

    pub fn food_posts_calls(&self) -> usize {
        self.food_posts_calls.load(Ordering::SeqCst)
    }

    pub fn claim_calls(&self) -> usize {
        self.claim_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn me(&self, token: &str) -> ApiResult<User> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.me_error.lock().unwrap().clone() {
            return Err(err);
        }
        if token != GOOD_TOKEN {
            return Err(status_error(401, "Could not validate credentials"));
        }
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| status_error(401, "Could not validate credentials"))
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<TokenResponse> {
        self.login_result.lock().unwrap().clone()
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<()> {
        self.register_result.lock().unwrap().clone()
    }

    async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.categories.lock().unwrap().clone()
    }

    async fn food_posts(&self) -> ApiResult<Vec<FoodPost>> {
        self.food_posts_calls.fetch_add(1, Ordering::SeqCst);
        let gated = self.gated.lock().unwrap().take();
        if let Some(Gated { gate, posts }) = gated {
            gate.notified().await;
            return Ok(posts);
        }
        self.posts.lock().unwrap().clone()
    }

    async fn food_post(&self, id: i64) -> ApiResult<FoodPost> {
        let posts = self.posts.lock().unwrap().clone()?;
        posts
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| status_error(404, "Food post not found"))
    }

    async fn claim_food_post(&self, _id: i64, _token: &str) -> ApiResult<()> {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
        self.claim_result.lock().unwrap().clone()
    }

    async fn create_food_post(&self, post: NewFoodPost, _token: &str) -> ApiResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(post);
        self.create_result.lock().unwrap().clone()
    }
}

pub fn fast_settings() -> ControllerSettings {
    ControllerSettings {
        toast_ttl: Duration::from_secs(60),
        login_prompt_delay: Duration::from_millis(20),
    }
}

pub fn controller(backend: Arc<FakeBackend>, tokens: Arc<MemoryTokenStore>) -> Controller {
    Controller::new(backend, tokens, fast_settings())
}

/// Messages of the toasts currently on screen.
pub async fn toast_messages(controller: &Controller) -> Vec<String> {
    controller
        .snapshot()
        .await
        .toasts
        .into_iter()
        .map(|t| t.message)
        .collect()
}
