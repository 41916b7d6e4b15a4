use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::api::FoodPost;

/// Shown for posts without a primary image.
pub const PLACEHOLDER_IMAGE: &str = "/assets/img/placeholder-food.svg";

/// Backend images are served relative to the API base URL.
pub fn image_url(base_url: &str, image_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        image_path.trim_start_matches('/')
    )
}

pub fn card_image_url(base_url: &str, post: &FoodPost) -> String {
    match &post.primary_image {
        Some(img) if !img.image_path.is_empty() => image_url(base_url, &img.image_path),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Parse the timestamp shapes the backend emits (ISO with or without
/// offset or fraction, or a bare date).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Display format of every calendar date on the page, e.g. "Jan 15, 2025".
const DATE_FORMAT: &str = "%b %-d, %Y";

/// "Jan 15, 2025", or the raw text when it is not a date.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Creation date shown on a card; empty when the backend sent none.
pub fn format_posted(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_default()
}

fn format_clock(raw: &str) -> String {
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn pickup_window(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("From {} to {}", format_clock(s), format_clock(e))),
        (Some(s), None) => Some(format!("From {}", format_clock(s))),
        (None, Some(e)) => Some(format!("Until {}", format_clock(e))),
        (None, None) => None,
    }
}

/// Uppercased first character of the username.
pub fn avatar_initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
