use serde::Deserialize;

use crate::api::FoodPost;

/// Search bar state. Blank fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    /// Free text matched against title or description.
    pub q: String,
    /// Category id as submitted by the select control.
    pub category: String,
    /// Matched against the poster's city.
    pub location: String,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.category.is_empty() && self.location.is_empty()
    }

    pub fn matches(&self, post: &FoodPost) -> bool {
        self.matches_query(post) && self.matches_category(post) && self.matches_location(post)
    }

    pub fn apply(&self, posts: &[FoodPost]) -> Vec<FoodPost> {
        posts.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    fn matches_query(&self, post: &FoodPost) -> bool {
        if self.q.is_empty() {
            return true;
        }
        let needle = self.q.to_lowercase();
        post.title.to_lowercase().contains(&needle)
            || post.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, post: &FoodPost) -> bool {
        if self.category.is_empty() {
            return true;
        }
        post.category
            .as_ref()
            .is_some_and(|c| loosely_equals(c.id, &self.category))
    }

    fn matches_location(&self, post: &FoodPost) -> bool {
        if self.location.is_empty() {
            return true;
        }
        let needle = self.location.to_lowercase();
        post.poster_city()
            .is_some_and(|city| !city.is_empty() && city.to_lowercase().contains(&needle))
    }
}

/// Compare an id with a form value the way a select value compares to a
/// number: numerically when the value parses, textually otherwise.
fn loosely_equals(id: i64, value: &str) -> bool {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(n) => n == id as f64,
        Err(_) => id.to_string() == value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, User};

    fn post(id: i64, title: &str, category: Option<i64>, city: Option<&str>) -> FoodPost {
        FoodPost {
            id,
            title: title.to_string(),
            description: format!("{} to give away", title.to_lowercase()),
            pickup_location: "Corner".to_string(),
            quantity: None,
            expiry_date: None,
            pickup_time_start: None,
            pickup_time_end: None,
            created_at: None,
            user_id: None,
            user: Some(User {
                id: 100 + id,
                username: format!("user{}", id),
                email: None,
                full_name: None,
                city: city.map(str::to_string),
                bio: None,
            }),
            category: category.map(|id| Category {
                id,
                name: format!("cat{}", id),
                description: None,
            }),
            images: vec![],
            primary_image: None,
        }
    }

    fn titles(posts: &[FoodPost]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let posts = vec![post(1, "Bread", None, None), post(2, "Soup", Some(1), None)];
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&posts).len(), 2);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let posts = vec![
            post(1, "Bread", None, None),
            post(2, "Rice Bag", None, None),
            post(3, "Soup", None, None),
        ];
        let filter = SearchFilter {
            q: "ri".to_string(),
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["Rice Bag"]);
    }

    #[test]
    fn query_matches_description_too() {
        let mut p = post(1, "Leftovers", None, None);
        p.description = "Homemade LASAGNA".to_string();
        let filter = SearchFilter {
            q: "lasagna".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn category_uses_loose_equality() {
        let posts = vec![
            post(1, "Bread", Some(1), None),
            post(2, "Rice Bag", Some(2), None),
            post(3, "Soup", None, None),
        ];
        for value in ["2", " 2 ", "2.0"] {
            let filter = SearchFilter {
                category: value.to_string(),
                ..Default::default()
            };
            assert_eq!(titles(&filter.apply(&posts)), vec!["Rice Bag"], "value {:?}", value);
        }
    }

    #[test]
    fn location_matches_poster_city_and_skips_missing() {
        let posts = vec![
            post(1, "Bread", None, Some("Berlin")),
            post(2, "Rice Bag", None, Some("Bern")),
            post(3, "Soup", None, None),
        ];
        let filter = SearchFilter {
            location: "BER".to_string(),
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["Bread", "Rice Bag"]);

        let filter = SearchFilter {
            location: "lin".to_string(),
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["Bread"]);
    }

    #[test]
    fn filters_are_and_combined() {
        let posts = vec![
            post(1, "Rice", Some(2), Some("Oslo")),
            post(2, "Rice", Some(2), Some("Rome")),
            post(3, "Rice", Some(3), Some("Oslo")),
            post(4, "Bread", Some(2), Some("Oslo")),
        ];
        let filter = SearchFilter {
            q: "rice".to_string(),
            category: "2".to_string(),
            location: "oslo".to_string(),
        };
        let ids: Vec<i64> = filter.apply(&posts).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
