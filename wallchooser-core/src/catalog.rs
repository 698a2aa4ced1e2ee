use log::{debug, info};
use serde::Serialize;

use crate::services::{ResourceId, ResourceStore};

pub const THUMBNAIL_SUFFIX: &str = "_small";

/// Wallpapers shipped with the chooser, in gallery order.
pub const BUILTIN_WALLPAPERS: &[&str] = &[
    "wallpaper_skate",
    "wallpaper_prash_nexus_surf",
    "wallpaper_cyan",
    "wallpaper_cyan_green",
    "wallpaper_donut",
    "wallpaper_glass",
    "wallpaper_hazey",
    "wallpaper_frog",
    "wallpaper_turtle",
    "wallpaper_0008",
    "wallpaper_0013",
    "wallpaper_bossa",
    "wallpaper_clone",
    "wallpaper_curves",
    "wallpaper_deep",
    "wallpaper_linked",
    "wallpaper_pacific",
    "wallpaper_reactive",
    "wallpaper_resonance",
    "wallpaper_siren",
    "wallpaper_stack",
    "wallpaper_swell",
    "wallpaper_tangy",
    "wallpaper_track",
    "wallpaper_vibe",
];

/// Built-in base names whose full image or thumbnail `resources` lacks.
pub fn missing_builtins<R: ResourceStore + ?Sized>(resources: &R) -> Vec<&'static str> {
    BUILTIN_WALLPAPERS
        .iter()
        .copied()
        .filter(|name| {
            resources.identifier(name).is_none()
                || resources
                    .identifier(&format!("{name}{THUMBNAIL_SUFFIX}"))
                    .is_none()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub thumbnail: ResourceId,
    pub full_image: ResourceId,
}

impl ImageEntry {
    /// Pair a base name with its `_small` thumbnail, without lookup.
    pub fn from_base_name(name: &str) -> Self {
        Self {
            thumbnail: ResourceId::new(format!("{name}{THUMBNAIL_SUFFIX}")),
            full_image: ResourceId::new(name),
        }
    }
}

/// Thumbnail and full-image lists backing the gallery.
///
/// The two lists always have the same length and index `i` of one
/// previews index `i` of the other.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    thumbs: Vec<ResourceId>,
    images: Vec<ResourceId>,
}

impl Catalog {
    /// Seed with the built-in set, then append every extra name whose full
    /// image and `_small` thumbnail both resolve. Anything else is dropped.
    pub fn build<R: ResourceStore + ?Sized>(resources: &R, extras: &[String]) -> Self {
        let seed: Vec<ImageEntry> = BUILTIN_WALLPAPERS
            .iter()
            .map(|name| ImageEntry::from_base_name(name))
            .collect();
        Self::build_with_seed(resources, &seed, extras)
    }

    pub fn build_with_seed<R: ResourceStore + ?Sized>(
        resources: &R,
        seed: &[ImageEntry],
        extras: &[String],
    ) -> Self {
        let mut catalog = Self {
            thumbs: Vec::with_capacity(seed.len() + 4),
            images: Vec::with_capacity(seed.len() + 4),
        };
        for entry in seed {
            catalog.push(entry.clone());
        }

        for extra in extras {
            let Some(image) = resources.identifier(extra) else {
                debug!("Dropping extra wallpaper {}: no full image", extra);
                continue;
            };
            let Some(thumb) = resources.identifier(&format!("{extra}{THUMBNAIL_SUFFIX}")) else {
                debug!("Dropping extra wallpaper {}: no thumbnail", extra);
                continue;
            };
            catalog.push(ImageEntry {
                thumbnail: thumb,
                full_image: image,
            });
        }

        info!(
            "Built wallpaper catalog: {} built-in, {} total",
            seed.len(),
            catalog.len()
        );
        catalog
    }

    fn push(&mut self, entry: ImageEntry) {
        self.thumbs.push(entry.thumbnail);
        self.images.push(entry.full_image);
    }

    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }

    pub fn thumbnails(&self) -> &[ResourceId] {
        &self.thumbs
    }

    pub fn images(&self) -> &[ResourceId] {
        &self.images
    }

    pub fn thumbnail(&self, index: usize) -> Option<&ResourceId> {
        self.thumbs.get(index)
    }

    pub fn full_image(&self, index: usize) -> Option<&ResourceId> {
        self.images.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = ImageEntry> + '_ {
        self.thumbs
            .iter()
            .zip(&self.images)
            .map(|(thumbnail, full_image)| ImageEntry {
                thumbnail: thumbnail.clone(),
                full_image: full_image.clone(),
            })
    }
}
