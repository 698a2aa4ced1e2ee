use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::services::WallpaperSetter;

/// Applies wallpapers to the desktop through the `wallpaper` crate.
///
/// The stream is written to `current.<ext>` in `applied_dir` first, since
/// desktop backends only take a path.
#[derive(Debug, Clone)]
pub struct DesktopWallpaper {
    applied_dir: PathBuf,
}

impl DesktopWallpaper {
    pub fn new(applied_dir: impl Into<PathBuf>) -> Self {
        Self {
            applied_dir: applied_dir.into(),
        }
    }

    pub fn applied_dir(&self) -> &Path {
        &self.applied_dir
    }

    /// Write the stream to disk and return the file the desktop should use.
    pub fn store_stream(&self, stream: &mut dyn Read) -> io::Result<PathBuf> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;

        let ext = image::guess_format(&bytes)
            .ok()
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("img");
        let path = self.applied_dir.join(format!("current.{ext}"));

        fs::create_dir_all(&self.applied_dir)?;
        fs::write(&path, &bytes)?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(path)
    }
}

impl WallpaperSetter for DesktopWallpaper {
    fn set_wallpaper_from_stream(&self, stream: &mut dyn Read) -> io::Result<()> {
        let path = self.store_stream(stream)?;
        let file_loc = path.to_string_lossy();
        wallpaper::set_from_path(&file_loc)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        info!("Desktop wallpaper set to: {}", file_loc);
        Ok(())
    }
}
