//! Placement math for new items.
//!
//! Resolves which image to draw and how large to draw it, then centres the
//! object on the canvas. Physical sizes win over the default cap:
//!
//! ```text
//! with size_mm:    scale = longer_side_mm * px_per_mm / longer_side_px
//! without:         scale = max_item_size / longer_side_px
//! ```

use serde::{Deserialize, Serialize};

use decokit_core::constants::{
    DEFAULT_MAX_ITEM_SIZE, DUPLICATE_OFFSET, FALLBACK_IMAGE, PX_PER_MM,
};
use decokit_core::units::mm_to_px;
use decokit_core::{CatalogItem, ImageRef, ImageSize, Point, SceneError, SizeMm, Transform};

use crate::image_loader::ImageLoader;

/// Placement tunables, normally taken from the canvas settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSettings {
    /// Longer side of an item without a physical size.
    pub max_item_size: f64,
    pub px_per_mm: f64,
    /// Used when the catalog item has no placeable image.
    pub fallback_image: ImageRef,
    pub duplicate_offset: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            max_item_size: DEFAULT_MAX_ITEM_SIZE,
            px_per_mm: PX_PER_MM,
            fallback_image: ImageRef::new(FALLBACK_IMAGE),
            duplicate_offset: DUPLICATE_OFFSET,
        }
    }
}

/// A size/image variant the user picked before placing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub label: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub size_mm: Option<SizeMm>,
}

impl SizeVariant {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: None,
            size_mm: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(ImageRef::new(image));
        self
    }

    pub fn with_size_mm(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.size_mm = Some(SizeMm::new(width_mm, height_mm));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementOptions {
    pub variant: Option<SizeVariant>,
}

impl PlacementOptions {
    pub fn with_variant(variant: SizeVariant) -> Self {
        Self {
            variant: Some(variant),
        }
    }
}

/// Everything needed to put an item on the surface, computed before any
/// mutation happens.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPlacement {
    pub item: CatalogItem,
    pub image: ImageRef,
    pub natural_size: ImageSize,
    pub transform: Transform,
    pub variant: Option<SizeVariant>,
}

/// Image to draw: variant image, then the item's first image, then the fallback.
pub fn resolve_image(
    item: &CatalogItem,
    options: &PlacementOptions,
    settings: &PlacementSettings,
) -> ImageRef {
    options
        .variant
        .as_ref()
        .and_then(|v| v.image.as_ref())
        .filter(|image| !image.is_empty())
        .or_else(|| item.primary_image())
        .cloned()
        .unwrap_or_else(|| settings.fallback_image.clone())
}

/// Uniform display scale for an image of `natural` size.
pub fn display_scale(
    natural: ImageSize,
    size_mm: Option<SizeMm>,
    settings: &PlacementSettings,
) -> f64 {
    let longer_px = natural.longer_side();
    if longer_px <= 0.0 {
        return 1.0;
    }

    match size_mm.map(|s| s.longer_side()).filter(|mm| *mm > 0.0) {
        Some(longer_mm) => mm_to_px(longer_mm, settings.px_per_mm) / longer_px,
        None => settings.max_item_size / longer_px,
    }
}

/// Load the image and compute the centred transform.
pub async fn prepare(
    loader: &dyn ImageLoader,
    item: &CatalogItem,
    options: &PlacementOptions,
    settings: &PlacementSettings,
    center: Point,
) -> Result<PreparedPlacement, SceneError> {
    let image = resolve_image(item, options, settings);
    let natural_size = loader.load(&image).await?;

    let size_mm = options
        .variant
        .as_ref()
        .and_then(|v| v.size_mm)
        .or(item.size_mm);
    let scale = display_scale(natural_size, size_mm, settings);

    Ok(PreparedPlacement {
        item: item.clone(),
        image,
        natural_size,
        transform: Transform::centered(center, scale),
        variant: options.variant.clone(),
    })
}
