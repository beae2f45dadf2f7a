use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::common::ImageError;

/// Local-disk object store for product images, served back under the
/// `/media` mount. Keys follow `<business-id>/<product-id><ext>`.
#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Stored file extension for an uploaded content type. Unknown types
    /// fall back to jpg, the overwhelmingly common upload.
    pub fn extension_for(content_type: Option<&str>) -> &'static str {
        match content_type {
            Some("image/png") => ".png",
            Some("image/webp") => ".webp",
            Some("image/gif") => ".gif",
            _ => ".jpg",
        }
    }

    /// Writes the bytes under `key`, creating parent directories, and
    /// returns the public URL. Keys that could escape the root are
    /// rejected.
    pub fn save(&self, key: &str, bytes: &[u8]) -> Result<String, ImageError> {
        if !key_is_safe(key) {
            return Err(ImageError::InvalidKey(key.to_string()));
        }

        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;

        Ok(self.public_url(key))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), key)
    }
}

fn key_is_safe(key: &str) -> bool {
    !key.is_empty()
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_keys() {
        assert!(key_is_safe("biz/42.jpg"));
        assert!(!key_is_safe(""));
        assert!(!key_is_safe("/etc/passwd"));
        assert!(!key_is_safe("../outside.jpg"));
        assert!(!key_is_safe("biz/../../outside.jpg"));
    }

    #[test]
    fn maps_content_types_to_extensions() {
        assert_eq!(ImageStore::extension_for(Some("image/png")), ".png");
        assert_eq!(ImageStore::extension_for(Some("image/webp")), ".webp");
        assert_eq!(ImageStore::extension_for(Some("image/jpeg")), ".jpg");
        assert_eq!(ImageStore::extension_for(None), ".jpg");
    }

    #[test]
    fn builds_public_urls_without_double_slashes() {
        let store = ImageStore::new("/tmp/menupress-media", "/media/");
        assert_eq!(store.public_url("biz/42.jpg"), "/media/biz/42.jpg");
    }

    #[test]
    fn save_round_trips_bytes() {
        let root = std::env::temp_dir().join("menupress-image-store-test");
        let store = ImageStore::new(&root, "/media");

        let url = store.save("biz/1.jpg", b"fake-image").expect("save should succeed");
        assert_eq!(url, "/media/biz/1.jpg");
        assert_eq!(
            fs::read(root.join("biz/1.jpg")).expect("file should exist"),
            b"fake-image"
        );

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn save_refuses_unsafe_keys() {
        let store = ImageStore::new("/tmp/menupress-media", "/media");
        assert!(matches!(
            store.save("../escape.jpg", b"x"),
            Err(ImageError::InvalidKey(_))
        ));
    }
}
