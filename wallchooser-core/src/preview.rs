use log::{debug, warn};

use crate::bitmap::{BitmapDecoder, DecodeOptions};
use crate::services::{ResourceId, ResourceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawHints {
    pub filter_bitmap: bool,
    pub dither: bool,
}

/// Area the highlighted wallpaper is drawn into.
pub trait PreviewSurface<B> {
    /// Show `bitmap`, or clear the surface on `None`.
    fn set_image_bitmap(&mut self, bitmap: Option<&B>, hints: DrawHints);
}

/// Holds at most one decoded preview at a time.
pub struct PreviewController<D: BitmapDecoder> {
    decoder: D,
    options: DecodeOptions,
    bitmap: Option<D::Bitmap>,
}

impl<D: BitmapDecoder> PreviewController<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            options: DecodeOptions::PREVIEW,
            bitmap: None,
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn bitmap(&self) -> Option<&D::Bitmap> {
        self.bitmap.as_ref()
    }

    /// Decode `image` and show it. The previous preview is released before
    /// decoding starts, so only one bitmap is ever held.
    pub fn show<R, S>(&mut self, resources: &R, image: &ResourceId, surface: &mut S)
    where
        R: ResourceStore + ?Sized,
        S: PreviewSurface<D::Bitmap> + ?Sized,
    {
        debug!("Previewing {}", image);
        drop(self.bitmap.take());

        let decoded = match resources.open_raw_resource(image) {
            Ok(mut stream) => self.decoder.decode_stream(&mut stream, &self.options),
            Err(e) => {
                warn!("Failed to open {} for preview: {}", image, e);
                None
            }
        };

        let hints = if decoded.is_some() {
            DrawHints {
                filter_bitmap: true,
                dither: true,
            }
        } else {
            DrawHints::default()
        };
        surface.set_image_bitmap(decoded.as_ref(), hints);
        self.bitmap = decoded;
    }

    pub fn release(&mut self) {
        self.bitmap = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Bitmap that tracks how many instances are alive.
    struct Tracked {
        name: String,
        live: Arc<AtomicUsize>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    struct TrackingDecoder {
        live: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        /// `live` as seen at the start of each decode.
        live_on_entry: Mutex<Vec<usize>>,
    }

    impl BitmapDecoder for TrackingDecoder {
        type Bitmap = Tracked;

        fn decode_stream(&self, stream: &mut dyn Read, _options: &DecodeOptions) -> Option<Tracked> {
            self.live_on_entry
                .lock()
                .unwrap()
                .push(self.live.load(Ordering::SeqCst));
            let mut name = String::new();
            stream.read_to_string(&mut name).ok()?;
            if name == "broken" {
                return None;
            }
            let now = self.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            Some(Tracked {
                name,
                live: self.live.clone(),
            })
        }
    }

    /// Every resource's bytes are its own name.
    struct EchoResources;

    impl ResourceStore for EchoResources {
        fn identifier(&self, name: &str) -> Option<ResourceId> {
            Some(ResourceId::new(name))
        }

        fn open_raw_resource(&self, id: &ResourceId) -> io::Result<Box<dyn Read + '_>> {
            if id.name() == "missing" {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(Box::new(Cursor::new(id.name().as_bytes().to_vec())))
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        shown: Vec<(Option<String>, DrawHints)>,
    }

    impl PreviewSurface<Tracked> for RecordingSurface {
        fn set_image_bitmap(&mut self, bitmap: Option<&Tracked>, hints: DrawHints) {
            self.shown.push((bitmap.map(|b| b.name.clone()), hints));
        }
    }

    fn controller() -> (PreviewController<TrackingDecoder>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let live = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let decoder = TrackingDecoder {
            live: live.clone(),
            peak: peak.clone(),
            live_on_entry: Mutex::new(Vec::new()),
        };
        (PreviewController::new(decoder), live, peak)
    }

    #[test]
    fn uses_fixed_decode_options() {
        let (preview, _, _) = controller();
        assert!(!preview.options().dither);
        assert_eq!(preview.options().preferred_config, crate::bitmap::PixelFormat::Argb8888);
    }

    #[test]
    fn reselecting_releases_previous_bitmap() {
        let (mut preview, live, peak) = controller();
        let mut surface = RecordingSurface::default();
        let image = ResourceId::new("wallpaper_cyan");

        preview.show(&EchoResources, &image, &mut surface);
        assert_eq!(live.load(Ordering::SeqCst), 1);
        preview.show(&EchoResources, &image, &mut surface);

        assert_eq!(live.load(Ordering::SeqCst), 1);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(*preview.decoder.live_on_entry.lock().unwrap(), [0, 0]);
        assert_eq!(preview.bitmap().map(|b| b.name.as_str()), Some("wallpaper_cyan"));

        let hints = DrawHints {
            filter_bitmap: true,
            dither: true,
        };
        assert_eq!(surface.shown.len(), 2);
        assert!(surface.shown.iter().all(|(_, h)| *h == hints));
    }

    #[test]
    fn failed_decode_clears_surface_and_releases() {
        let (mut preview, live, _) = controller();
        let mut surface = RecordingSurface::default();

        preview.show(&EchoResources, &ResourceId::new("wallpaper_frog"), &mut surface);
        preview.show(&EchoResources, &ResourceId::new("broken"), &mut surface);
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert!(preview.bitmap().is_none());
        assert_eq!(surface.shown.last(), Some(&(None, DrawHints::default())));

        preview.show(&EchoResources, &ResourceId::new("missing"), &mut surface);
        assert_eq!(surface.shown.len(), 3);
        assert!(preview.bitmap().is_none());
    }

    #[test]
    fn release_drops_held_bitmap() {
        let (mut preview, live, _) = controller();
        let mut surface = RecordingSurface::default();

        preview.show(&EchoResources, &ResourceId::new("wallpaper_deep"), &mut surface);
        preview.release();
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}
