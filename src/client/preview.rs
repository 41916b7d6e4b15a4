use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::join_all;

use crate::api::ImageUpload;

/// A selected image rendered inline before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub file_name: String,
    pub data_url: String,
}

/// Encode every `image/*` file as a data URL. Other files are skipped.
///
/// Files are read concurrently; the result keeps selection order.
pub async fn thumbnails(files: &[ImageUpload]) -> Vec<Thumbnail> {
    let reads = files.iter().filter(|f| f.is_image()).cloned().map(|file| {
        tokio::task::spawn_blocking(move || Thumbnail {
            data_url: data_url(&file.mime_type(), &file.data),
            file_name: file.file_name,
        })
    });

    join_all(reads)
        .await
        .into_iter()
        .filter_map(|res| match res {
            Ok(thumb) => Some(thumb),
            Err(e) => {
                tracing::warn!("Preview read failed: {}", e);
                None
            }
        })
        .collect()
}

pub fn data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn upload(name: &str, content_type: Option<&str>, data: &'static [u8]) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn data_url_is_base64() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn only_images_get_thumbnails_in_order() {
        let files = vec![
            upload("a.jpg", Some("image/jpeg"), b"jpeg"),
            upload("notes.txt", Some("text/plain"), b"text"),
            upload("b.png", None, b"png"),
        ];
        let thumbs = thumbnails(&files).await;
        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs[0].file_name, "a.jpg");
        assert!(thumbs[0].data_url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(thumbs[1].file_name, "b.png");
        assert!(thumbs[1].data_url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn no_files_no_thumbnails() {
        assert!(thumbnails(&[]).await.is_empty());
    }
}
