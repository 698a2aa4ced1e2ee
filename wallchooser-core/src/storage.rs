use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::services::{ResourceId, ResourceStore};

/// File extensions a drawable may be stored under, in lookup order.
pub const DRAWABLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub drawable_dir: PathBuf,
    pub applied_dir: PathBuf,
    pub extra_wallpapers_file: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "wallchooser", "wallchooser")
            .context("Failed to get project directories")?;
        Self::with_root(proj_dirs.config_dir())
    }

    pub fn with_root(config_dir: &Path) -> Result<Self> {
        let config_dir = config_dir.to_path_buf();
        let drawable_dir = config_dir.join("drawable");
        let applied_dir = config_dir.join("applied");
        let extra_wallpapers_file = config_dir.join("extra_wallpapers.conf");

        fs::create_dir_all(&drawable_dir)
            .with_context(|| format!("Failed to create {}", drawable_dir.display()))?;
        fs::create_dir_all(&applied_dir)
            .with_context(|| format!("Failed to create {}", applied_dir.display()))?;

        if !extra_wallpapers_file.exists() {
            fs::write(&extra_wallpapers_file, "")?;
        }

        Ok(Config {
            config_dir,
            drawable_dir,
            applied_dir,
            extra_wallpapers_file,
        })
    }

    pub fn load_extra_wallpapers(&self) -> Result<Vec<String>> {
        load_extra_wallpapers(&self.extra_wallpapers_file)
    }
}

/// One base name per line. Blank lines and `#` comments are skipped.
pub fn load_extra_wallpapers(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Drawables stored as image files in a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        DRAWABLE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl ResourceStore for DirectoryResources {
    fn identifier(&self, name: &str) -> Option<ResourceId> {
        self.path_of(name).map(|_| ResourceId::new(name))
    }

    fn open_raw_resource(&self, id: &ResourceId) -> io::Result<Box<dyn Read + '_>> {
        let path = self.path_of(id.name()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no drawable named {} in {}", id, self.root.display()),
            )
        })?;
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}
