//! Image resolution.
//!
//! Placement needs the natural pixel size of an image before the object can be
//! scaled. Fetching and decoding is asynchronous and may fail; a failure is a
//! [`SceneError::ImageLoad`] and leaves the document untouched.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use decokit_core::{thread_safe_rw_map, ImageRef, ImageSize, SceneError, ThreadSafeRwMap};

/// Resolves image references to their natural size.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, image: &ImageRef) -> Result<ImageSize, SceneError>;
}

/// Reads image headers from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, image: &ImageRef) -> PathBuf {
        self.root.join(image.as_str().trim_start_matches('/'))
    }
}

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, image: &ImageRef) -> Result<ImageSize, SceneError> {
        if image.is_empty() {
            return Err(SceneError::image_load(image.as_str(), "empty image reference"));
        }

        let path = self.resolve(image);
        tracing::debug!("Loading image {}", path.display());

        let dimensions = tokio::task::spawn_blocking(move || image::image_dimensions(&path))
            .await
            .map_err(|e| SceneError::image_load(image.as_str(), e.to_string()))?
            .map_err(|e| SceneError::image_load(image.as_str(), e.to_string()))?;

        let size = ImageSize::new(dimensions.0, dimensions.1);
        if size.is_empty() {
            return Err(SceneError::image_load(image.as_str(), "image has no pixels"));
        }
        Ok(size)
    }
}

/// In-memory table of known images.
///
/// Unknown references fail like a missing file would.
#[derive(Debug, Clone)]
pub struct MemoryImageLoader {
    sizes: ThreadSafeRwMap<String, ImageSize>,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self {
            sizes: thread_safe_rw_map(),
        }
    }

    /// Register an image with its natural size.
    pub fn insert(&self, image: impl Into<String>, size: ImageSize) {
        self.sizes.write().insert(image.into(), size);
    }

    pub fn with_image(self, image: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert(image, ImageSize::new(width, height));
        self
    }

    pub fn remove(&self, image: &str) {
        self.sizes.write().remove(image);
    }
}

impl Default for MemoryImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for MemoryImageLoader {
    async fn load(&self, image: &ImageRef) -> Result<ImageSize, SceneError> {
        self.sizes
            .read()
            .get(image.as_str())
            .copied()
            .ok_or_else(|| SceneError::image_load(image.as_str(), "not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_loader() {
        let loader = MemoryImageLoader::new().with_image("a.png", 200, 50);
        assert_eq!(
            loader.load(&ImageRef::new("a.png")).await,
            Ok(ImageSize::new(200, 50))
        );

        let err = loader.load(&ImageRef::new("b.png")).await.unwrap_err();
        assert!(matches!(err, SceneError::ImageLoad { .. }));
    }

    #[tokio::test]
    async fn test_fs_loader_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbaImage::new(40, 20);
        img.save(dir.path().join("bead.png")).unwrap();

        let loader = FsImageLoader::new(dir.path());
        let size = loader.load(&ImageRef::new("bead.png")).await.unwrap();
        assert_eq!(size, ImageSize::new(40, 20));
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FsImageLoader::new(dir.path());

        let err = loader.load(&ImageRef::new("nope.png")).await.unwrap_err();
        assert!(matches!(err, SceneError::ImageLoad { ref image, .. } if image == "nope.png"));
    }

    #[tokio::test]
    async fn test_fs_loader_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        let loader = FsImageLoader::new(dir.path());

        assert!(loader.load(&ImageRef::new("broken.png")).await.is_err());
    }
}
