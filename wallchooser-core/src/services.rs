// Service traits the chooser is composed from. A host (terminal, GUI, tests)
// provides these instead of the chooser reaching into a platform toolkit.
use std::fmt;
use std::io::{self, Read};

use serde::Serialize;

/// Opaque handle to a bundled drawable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Service trait for the bundled resource namespace
pub trait ResourceStore: Send + Sync {
    /// Resolve a drawable name, `None` if nothing by that name is bundled
    fn identifier(&self, name: &str) -> Option<ResourceId>;

    /// Open the raw, undecoded bytes of a resource
    fn open_raw_resource(&self, id: &ResourceId) -> io::Result<Box<dyn Read + '_>>;
}

/// Service trait for the platform background facility
pub trait WallpaperSetter: Send + Sync {
    fn set_wallpaper_from_stream(&self, stream: &mut dyn Read) -> io::Result<()>;
}

/// Lifecycle hooks a host drives the screen through
pub trait Screen {
    fn on_create(&mut self) -> anyhow::Result<()>;
    fn on_resume(&mut self);
    fn on_destroy(&mut self);
}

/// What a finished screen reports back to whoever launched it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenResult {
    #[default]
    Canceled,
    Ok,
}
