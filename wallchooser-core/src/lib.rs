pub mod adapter;
pub mod bitmap;
pub mod catalog;
pub mod chooser;
pub mod desktop;
pub mod preview;
pub mod services;
pub mod storage;

pub use adapter::{ImageAdapter, ListSource, ThumbnailCell};
pub use bitmap::{Bitmap, BitmapDecoder, DecodeOptions, ImageDecoder, PixelFormat};
pub use catalog::{missing_builtins, Catalog, ImageEntry, BUILTIN_WALLPAPERS, THUMBNAIL_SUFFIX};
pub use chooser::{CommitOutcome, WallpaperChooser};
pub use desktop::DesktopWallpaper;
pub use preview::{DrawHints, PreviewController, PreviewSurface};
pub use services::{ResourceId, ResourceStore, Screen, ScreenResult, WallpaperSetter};
pub use storage::{load_extra_wallpapers, Config, DirectoryResources};
