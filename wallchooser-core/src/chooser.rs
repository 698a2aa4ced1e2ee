use std::io;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};

use crate::adapter::ImageAdapter;
use crate::bitmap::BitmapDecoder;
use crate::catalog::Catalog;
use crate::preview::{PreviewController, PreviewSurface};
use crate::services::{ResourceId, ResourceStore, Screen, ScreenResult, WallpaperSetter};

/// What a confirm trigger ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit already ran during this activation.
    Ignored,
    Applied,
    /// The stream could not be delivered. The screen stays open.
    Failed,
}

/// Gallery screen that previews the highlighted wallpaper and applies it on
/// confirm.
pub struct WallpaperChooser<D: BitmapDecoder, P: PreviewSurface<D::Bitmap>> {
    resources: Arc<dyn ResourceStore>,
    wallpaper_setter: Arc<dyn WallpaperSetter>,
    extra_wallpapers: Vec<String>,
    catalog: Catalog,
    preview: PreviewController<D>,
    surface: P,
    selected_position: Option<usize>,
    is_wallpaper_set: bool,
    result: ScreenResult,
    finishing: bool,
}

impl<D: BitmapDecoder, P: PreviewSurface<D::Bitmap>> WallpaperChooser<D, P> {
    pub fn new(
        resources: Arc<dyn ResourceStore>,
        wallpaper_setter: Arc<dyn WallpaperSetter>,
        extra_wallpapers: Vec<String>,
        decoder: D,
        surface: P,
    ) -> Self {
        Self {
            resources,
            wallpaper_setter,
            extra_wallpapers,
            catalog: Catalog::default(),
            preview: PreviewController::new(decoder),
            surface,
            selected_position: None,
            is_wallpaper_set: false,
            result: ScreenResult::default(),
            finishing: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn adapter(&self) -> ImageAdapter<'_> {
        ImageAdapter::new(&self.catalog)
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn preview_bitmap(&self) -> Option<&D::Bitmap> {
        self.preview.bitmap()
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selected_position
    }

    pub fn is_wallpaper_set(&self) -> bool {
        self.is_wallpaper_set
    }

    pub fn result(&self) -> ScreenResult {
        self.result
    }

    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    pub fn on_item_selected(&mut self, position: usize) {
        let Some(image) = self.catalog.full_image(position) else {
            debug!("Ignoring selection of {} outside the gallery", position);
            return;
        };
        self.selected_position = Some(position);
        self.preview
            .show(self.resources.as_ref(), image, &mut self.surface);
    }

    pub fn on_nothing_selected(&mut self) {}

    /// The set button: applies whatever is highlighted.
    pub fn on_click(&mut self) -> CommitOutcome {
        match self.selected_position {
            Some(position) => self.select_wallpaper(position),
            None => CommitOutcome::Ignored,
        }
    }

    /// A direct tap on a gallery image.
    pub fn on_item_click(&mut self, position: usize) -> CommitOutcome {
        self.select_wallpaper(position)
    }

    /// User backed out without choosing.
    pub fn cancel(&mut self) {
        self.result = ScreenResult::Canceled;
        self.finish();
    }

    // A tap can deliver both a click and a selection-confirm, so this runs
    // at most once per activation. The guard is consumed before the write
    // and stays consumed when the write fails.
    fn select_wallpaper(&mut self, position: usize) -> CommitOutcome {
        if self.is_wallpaper_set {
            return CommitOutcome::Ignored;
        }
        self.is_wallpaper_set = true;

        let written = self.write_wallpaper(position).map(ResourceId::to_string);
        match written {
            Ok(image) => {
                info!("Wallpaper set from {}", image);
                self.result = ScreenResult::Ok;
                self.finish();
                CommitOutcome::Applied
            }
            Err(e) => {
                error!("Failed to set wallpaper: {}", e);
                CommitOutcome::Failed
            }
        }
    }

    fn write_wallpaper(&self, position: usize) -> io::Result<&ResourceId> {
        let image = self.catalog.full_image(position).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no wallpaper at position {position}"),
            )
        })?;
        let mut stream = self.resources.open_raw_resource(image)?;
        self.wallpaper_setter.set_wallpaper_from_stream(&mut stream)?;
        Ok(image)
    }

    fn finish(&mut self) {
        self.finishing = true;
    }
}

impl<D: BitmapDecoder, P: PreviewSurface<D::Bitmap>> Screen for WallpaperChooser<D, P> {
    fn on_create(&mut self) -> Result<()> {
        self.catalog = Catalog::build(self.resources.as_ref(), &self.extra_wallpapers);
        self.selected_position = None;
        self.is_wallpaper_set = false;
        self.result = ScreenResult::Canceled;
        self.finishing = false;
        Ok(())
    }

    fn on_resume(&mut self) {
        self.is_wallpaper_set = false;
    }

    fn on_destroy(&mut self) {
        self.preview.release();
    }
}
