//! Typed rendering layer. Every fragment is an askama template over plain
//! view structs, so all interpolated backend data is HTML-escaped.

pub mod format;
pub mod views;

use askama::Template;

use crate::client::preview::Thumbnail;
use crate::client::ui::{Forms, Modals};
use crate::client::{SearchFilter, Snapshot};

pub use format::PLACEHOLDER_IMAGE;
pub use views::{category_options, CategoryOption, FoodCard, FoodDetailView, FoodGrid, ToastView};

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub username: Option<String>,
    pub view: &'static str,
    pub grid: FoodGrid,
    pub filter: SearchFilter,
    pub filter_categories: Vec<CategoryOption>,
    pub share_categories: Vec<CategoryOption>,
    pub modals: Modals,
    pub detail: Option<FoodDetailView>,
    pub preview: Vec<Thumbnail>,
    pub forms: Forms,
    pub toasts: Vec<ToastView>,
    pub toast_ms: u128,
}

impl IndexTemplate {
    pub fn from_snapshot(snapshot: &Snapshot, base_url: &str, toast_ms: u128) -> Self {
        Self {
            username: snapshot.current_user.as_ref().map(|u| u.username.clone()),
            view: snapshot.view.name(),
            grid: FoodGrid::new(base_url, &snapshot.posts, snapshot.loading),
            filter: snapshot.filter.clone(),
            filter_categories: category_options(&snapshot.categories, &snapshot.filter.category),
            share_categories: category_options(
                &snapshot.categories,
                &snapshot.forms.share.category_id,
            ),
            modals: snapshot.modals.clone(),
            detail: snapshot
                .detail
                .as_ref()
                .map(|post| FoodDetailView::new(base_url, post, snapshot.current_user.as_ref())),
            preview: snapshot.preview.clone(),
            forms: snapshot.forms.clone(),
            toasts: snapshot.toasts.iter().map(ToastView::from).collect(),
            toast_ms,
        }
    }
}

#[derive(Template)]
#[template(path = "components/image_preview.html")]
pub struct ImagePreviewTemplate {
    pub preview: Vec<Thumbnail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FoodPost;
    use crate::client::View;

    fn post(json: &str) -> FoodPost {
        serde_json::from_str(json).unwrap()
    }

    fn page(posts: Vec<FoodPost>) -> String {
        let snapshot = Snapshot {
            current_user: None,
            categories: Vec::new(),
            view: View::Browse,
            modals: Modals::default(),
            posts,
            loading: false,
            detail: None,
            preview: Vec::new(),
            filter: SearchFilter::default(),
            forms: Forms::default(),
            toasts: Vec::new(),
        };
        IndexTemplate::from_snapshot(&snapshot, "http://api", 3000)
            .render()
            .unwrap()
    }

    #[test]
    fn empty_grid_renders_placeholder_message() {
        let html = page(Vec::new());
        assert!(html.contains("No food posts available at the moment."));
        assert!(html.contains("id=\"browse\" class=\"section active\""));
    }

    #[test]
    fn grid_escapes_backend_text() {
        let p = post(r#"{"id": 1, "title": "<script>alert(1)</script>", "description": "ok"}"#);
        let html = page(vec![p]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("placeholder-food.svg"));
    }

    #[test]
    fn preview_renders_one_img_per_thumbnail() {
        let html = ImagePreviewTemplate {
            preview: vec![
                Thumbnail {
                    file_name: "a.png".into(),
                    data_url: "data:image/png;base64,AAAA".into(),
                },
                Thumbnail {
                    file_name: "b.png".into(),
                    data_url: "data:image/png;base64,BBBB".into(),
                },
            ],
        }
        .render()
        .unwrap();
        assert_eq!(html.matches("class=\"preview-image\"").count(), 2);
    }
}
