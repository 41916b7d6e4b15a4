//! reqwest client for the marketplace backend.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{
    ApiError, ApiResult, Backend, Category, FoodPost, LoginRequest, NewFoodPost,
    RegisterRequest, TokenResponse, User,
};

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded; a hung request then
    /// lasts until the OS gives up on the connection.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = parse_detail(&body);
        tracing::debug!("Backend answered {}: {:?}", status, detail);
        Err(ApiError::Status { status, detail })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }
}

/// Extract the `detail` field of an error body.
///
/// Validation failures carry a list of `{msg}` objects instead of a string;
/// their messages are joined.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn multipart_form(post: NewFoodPost) -> Form {
    let mut form = Form::new()
        .text("title", post.title)
        .text("description", post.description)
        .text("pickup_location", post.pickup_location);

    let optional = [
        ("category_id", post.category_id),
        ("quantity", post.quantity),
        ("expiry_date", post.expiry_date),
        ("pickup_time_start", post.pickup_time_start),
        ("pickup_time_end", post.pickup_time_end),
    ];
    for (name, value) in optional {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            form = form.text(name, value);
        }
    }

    for image in post.images {
        let mime = image.mime_type();
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&mime)
            .unwrap_or_else(|_| Part::bytes(image.data.to_vec()).file_name(image.file_name));
        form = form.part("images", part);
    }

    form
}

#[async_trait]
impl Backend for HttpBackend {
    async fn me(&self, token: &str) -> ApiResult<User> {
        self.send_json(self.client.get(self.url("/me")).bearer_auth(token))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse> {
        self.send_json(self.client.post(self.url("/login")).json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.send(self.client.post(self.url("/register")).json(request))
            .await?;
        Ok(())
    }

    async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.send_json(self.client.get(self.url("/categories")))
            .await
    }

    async fn food_posts(&self) -> ApiResult<Vec<FoodPost>> {
        self.send_json(self.client.get(self.url("/food-posts")))
            .await
    }

    async fn food_post(&self, id: i64) -> ApiResult<FoodPost> {
        self.send_json(self.client.get(self.url(&format!("/food-posts/{}", id))))
            .await
    }

    async fn claim_food_post(&self, id: i64, token: &str) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/food-posts/{}/claim", id)))
            .bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    async fn create_food_post(&self, post: NewFoodPost, token: &str) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url("/food-posts"))
            .bearer_auth(token)
            .multipart(multipart_form(post));
        self.send(request).await?;
        Ok(())
    }
}
