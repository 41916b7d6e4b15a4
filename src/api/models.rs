use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub image_path: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// A listing as returned by both `/food-posts` and `/food-posts/{id}`.
///
/// The list endpoint omits `user_id` and `images` and carries
/// `primary_image`; the detail endpoint does the opposite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPost {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub pickup_time_start: Option<String>,
    #[serde(default)]
    pub pickup_time_end: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub primary_image: Option<Image>,
}

impl FoodPost {
    pub fn owner_id(&self) -> Option<i64> {
        self.user_id.or_else(|| self.user.as_ref().map(|u| u.id))
    }

    pub fn poster_city(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.city.as_deref())
    }

    /// Image shown in the detail view: the flagged primary, else the first.
    pub fn detail_image(&self) -> Option<&Image> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub city: String,
    pub bio: String,
}

/// A file picked in the share form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: bytes::Bytes,
}

impl ImageUpload {
    /// Declared MIME type, or a guess from the file name.
    pub fn mime_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_string(),
            _ => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .to_string(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type().starts_with("image/")
    }
}

/// Fields of `POST /food-posts`. Blank optional fields are left out of the
/// multipart body.
#[derive(Debug, Clone, Default)]
pub struct NewFoodPost {
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub quantity: Option<String>,
    pub expiry_date: Option<String>,
    pub pickup_location: String,
    pub pickup_time_start: Option<String>,
    pub pickup_time_end: Option<String>,
    pub images: Vec<ImageUpload>,
}
