//! REST backend of the marketplace.
//!
//! [`Backend`] is the seam between the controller and the network: the
//! controller only ever talks to a `dyn Backend`, [`HttpBackend`] is the
//! reqwest implementation.

pub mod http;
pub mod models;

use async_trait::async_trait;

pub use http::HttpBackend;
pub use models::{
    Category, FoodPost, Image, ImageUpload, LoginRequest, NewFoodPost, RegisterRequest,
    TokenResponse, User,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// A 2xx answer whose body was not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Whether the backend actually answered (with a non-2xx status).
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /me`
    async fn me(&self, token: &str) -> ApiResult<User>;

    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse>;

    /// `POST /register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<()>;

    /// `GET /categories`
    async fn categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /food-posts`
    async fn food_posts(&self) -> ApiResult<Vec<FoodPost>>;

    /// `GET /food-posts/{id}`
    async fn food_post(&self, id: i64) -> ApiResult<FoodPost>;

    /// `POST /food-posts/{id}/claim`
    async fn claim_food_post(&self, id: i64, token: &str) -> ApiResult<()>;

    /// `POST /food-posts` as multipart
    async fn create_food_post(&self, post: NewFoodPost, token: &str) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_only_for_status_errors_with_body() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Cannot claim your own post".into()),
        };
        assert_eq!(err.detail(), Some("Cannot claim your own post"));

        let err = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.detail(), None);

        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.detail(), None);
        assert!(!err.is_status());
        assert!(!ApiError::Decode("expected value".into()).is_status());
    }
}
