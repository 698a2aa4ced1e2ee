pub use crate::app::{
    report_missing_builtins, CatalogRow, ChooserCliApp, ChooserOptions, TerminalPreview,
};

mod app {
    use anyhow::{bail, Result};
    use log::{info, warn};
    use serde::Serialize;
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::sync::Arc;
    use wallchooser_core::*;

    /// Gallery cells drawn either side of the highlight.
    const GALLERY_RADIUS: usize = 2;

    #[derive(Debug, Default, Clone)]
    pub struct ChooserOptions {
        pub drawables: Option<PathBuf>,
        pub extras: Option<PathBuf>,
    }

    #[derive(Debug, Serialize)]
    pub struct CatalogRow {
        pub index: usize,
        pub image: ResourceId,
        pub thumbnail: ResourceId,
    }

    /// Prints what a graphical preview pane would show.
    #[derive(Debug, Default)]
    pub struct TerminalPreview {
        pub last_shown: Option<(u32, u32)>,
    }

    impl PreviewSurface<Bitmap> for TerminalPreview {
        fn set_image_bitmap(&mut self, bitmap: Option<&Bitmap>, hints: DrawHints) {
            match bitmap {
                Some(bitmap) => {
                    println!(
                        "Preview: {}x{} {:?} (filter: {}, dither: {})",
                        bitmap.width, bitmap.height, bitmap.config, hints.filter_bitmap, hints.dither
                    );
                    self.last_shown = Some((bitmap.width, bitmap.height));
                }
                None => {
                    println!("Preview: (unavailable)");
                    self.last_shown = None;
                }
            }
        }
    }

    /// Built-in images are not bundled; they are expected under the drawable
    /// directory as `<name>.jpg` and `<name>_small.jpg`.
    pub fn report_missing_builtins(resources: &DirectoryResources) -> usize {
        let missing = missing_builtins(resources);
        if !missing.is_empty() {
            warn!(
                "{} of {} built-in wallpapers are missing from {} (first: {}); \
                 they will not preview or apply until copied there",
                missing.len(),
                BUILTIN_WALLPAPERS.len(),
                resources.root().display(),
                missing[0]
            );
        }
        missing.len()
    }

    fn report(outcome: CommitOutcome) -> CommitOutcome {
        match outcome {
            CommitOutcome::Applied => println!("Wallpaper set."),
            CommitOutcome::Failed => println!("Could not set wallpaper."),
            CommitOutcome::Ignored => {}
        }
        outcome
    }

    pub struct ChooserCliApp {
        chooser: WallpaperChooser<ImageDecoder, TerminalPreview>,
        recycled: Vec<ThumbnailCell>,
    }

    impl ChooserCliApp {
        pub fn new(options: ChooserOptions) -> Result<Self> {
            let config = Config::new()?;
            let drawables = options.drawables.unwrap_or_else(|| config.drawable_dir.clone());
            let extras = match options.extras {
                Some(path) => load_extra_wallpapers(&path)?,
                None => config.load_extra_wallpapers()?,
            };
            let resources = DirectoryResources::new(drawables);
            info!("Loading drawables from {}", resources.root().display());
            report_missing_builtins(&resources);

            let chooser = WallpaperChooser::new(
                Arc::new(resources),
                Arc::new(DesktopWallpaper::new(config.applied_dir.clone())),
                extras,
                ImageDecoder,
                TerminalPreview::default(),
            );
            Ok(Self::with_chooser(chooser))
        }

        pub fn with_chooser(chooser: WallpaperChooser<ImageDecoder, TerminalPreview>) -> Self {
            Self {
                chooser,
                recycled: Vec::new(),
            }
        }

        /// Create and resume the screen.
        pub fn initialize(&mut self) -> Result<()> {
            self.chooser.on_create()?;
            self.chooser.on_resume();
            Ok(())
        }

        pub fn chooser(&self) -> &WallpaperChooser<ImageDecoder, TerminalPreview> {
            &self.chooser
        }

        pub fn listing(&self) -> Vec<CatalogRow> {
            self.chooser
                .catalog()
                .entries()
                .enumerate()
                .map(|(index, entry)| CatalogRow {
                    index,
                    image: entry.full_image,
                    thumbnail: entry.thumbnail,
                })
                .collect()
        }

        pub fn highlight(&mut self, index: usize) -> Result<()> {
            if index >= self.chooser.adapter().count() {
                bail!("No wallpaper at index {}", index);
            }
            self.chooser.on_item_selected(index);
            Ok(())
        }

        fn step(&mut self, forward: bool) {
            let count = self.chooser.adapter().count();
            if count == 0 {
                self.chooser.on_nothing_selected();
                return;
            }
            let current = self.chooser.selected_position().unwrap_or(0);
            let next = if forward {
                (current + 1).min(count - 1)
            } else {
                current.saturating_sub(1)
            };
            if next != current || self.chooser.selected_position().is_none() {
                self.chooser.on_item_selected(next);
            }
        }

        /// Print the cells around the highlight, reusing cells from the
        /// previous draw.
        pub fn show_gallery(&mut self) -> Vec<ThumbnailCell> {
            let adapter = self.chooser.adapter();
            let count = adapter.count();
            let selected = self.chooser.selected_position().unwrap_or(0);
            let first = selected.saturating_sub(GALLERY_RADIUS);
            let last = (selected + GALLERY_RADIUS + 1).min(count);

            let mut drawn = Vec::with_capacity(last.saturating_sub(first));
            for position in first..last {
                let cell = adapter.render_cell(position, self.recycled.pop());
                let marker = if position == selected { ">" } else { " " };
                println!("{} [{:>2}] {}", marker, adapter.item(position), cell.image);
                drawn.push(cell);
            }
            self.recycled = drawn.clone();
            drawn
        }

        pub fn confirm(&mut self) -> CommitOutcome {
            report(self.chooser.on_click())
        }

        pub fn tap(&mut self) -> CommitOutcome {
            match self.chooser.selected_position() {
                Some(position) => report(self.chooser.on_item_click(position)),
                None => CommitOutcome::Ignored,
            }
        }

        /// Highlight `index`, confirm once, and close.
        pub fn set_index(&mut self, index: usize) -> Result<ScreenResult> {
            self.highlight(index)?;
            self.confirm();
            Ok(self.close())
        }

        fn close(&mut self) -> ScreenResult {
            if !self.chooser.is_finishing() {
                self.chooser.cancel();
            }
            self.chooser.on_destroy();
            self.chooser.result()
        }

        pub fn show_menu(&self) -> Result<()> {
            let count = self.chooser.adapter().count();
            let selected = self
                .chooser
                .selected_position()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());

            println!("\n=== Wallchooser ({} wallpapers, highlighted: {}) ===", count, selected);
            println!("n. Next    p. Previous    <number>. Highlight");
            println!("s. Set wallpaper    t. Tap image    g. Gallery    q. Quit");
            print!("\nSelect an option: ");
            io::stdout().flush()?;
            Ok(())
        }

        pub fn run(&mut self) -> Result<ScreenResult> {
            if !self.chooser.catalog().is_empty() {
                self.chooser.on_item_selected(0);
            }
            self.show_gallery();
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();

            while !self.chooser.is_finishing() {
                self.show_menu()?;
                let Some(line) = lines.next() else {
                    break;
                };
                let input = line?;

                match input.trim() {
                    "n" => {
                        self.step(true);
                        self.show_gallery();
                    }
                    "p" => {
                        self.step(false);
                        self.show_gallery();
                    }
                    "s" => {
                        self.confirm();
                    }
                    "t" => {
                        self.tap();
                    }
                    "g" => {
                        self.show_gallery();
                    }
                    "q" => {
                        println!("Exiting without changes...");
                        self.chooser.cancel();
                    }
                    other => match other.parse::<usize>() {
                        Ok(index) => {
                            if let Err(e) = self.highlight(index) {
                                eprintln!("{}", e);
                            } else {
                                self.show_gallery();
                            }
                        }
                        Err(_) => println!("Invalid option."),
                    },
                }
            }

            Ok(self.close())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wallchooser_core::{
        CommitOutcome, ImageDecoder, ResourceId, ResourceStore, ScreenResult, WallpaperChooser,
        WallpaperSetter,
    };

    struct NoResources;

    impl ResourceStore for NoResources {
        fn identifier(&self, _name: &str) -> Option<ResourceId> {
            None
        }

        fn open_raw_resource(&self, id: &ResourceId) -> io::Result<Box<dyn Read + '_>> {
            Ok(Box::new(Cursor::new(id.name().as_bytes().to_vec())))
        }
    }

    #[derive(Default)]
    struct CountingSetter(AtomicUsize);

    impl WallpaperSetter for CountingSetter {
        fn set_wallpaper_from_stream(&self, _stream: &mut dyn Read) -> io::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn app() -> (ChooserCliApp, Arc<CountingSetter>) {
        let setter = Arc::new(CountingSetter::default());
        let chooser = WallpaperChooser::new(
            Arc::new(NoResources),
            setter.clone(),
            Vec::new(),
            ImageDecoder,
            TerminalPreview::default(),
        );
        let mut app = ChooserCliApp::with_chooser(chooser);
        app.initialize().unwrap();
        (app, setter)
    }

    #[test]
    fn listing_covers_builtin_catalog() {
        let (app, _) = app();
        let rows = app.listing();

        assert_eq!(rows.len(), wallchooser_core::BUILTIN_WALLPAPERS.len());
        assert_eq!(rows[1].image, ResourceId::new("wallpaper_prash_nexus_surf"));
        assert_eq!(rows[1].thumbnail, ResourceId::new("wallpaper_prash_nexus_surf_small"));
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["image"], "wallpaper_skate");
    }

    #[test]
    fn gallery_reuses_cells_between_draws() {
        let (mut app, _) = app();
        let first = app.show_gallery();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|cell| cell.rebinds == 0 && cell.dither));

        app.highlight(10).unwrap();
        let second = app.show_gallery();
        assert_eq!(second.len(), 5);
        assert_eq!(second.iter().filter(|cell| cell.rebinds == 1).count(), 3);
        assert_eq!(second[2].image, ResourceId::new("wallpaper_0013_small"));
    }

    #[test]
    fn undecodable_preview_is_tolerated() {
        let (mut app, _) = app();
        assert_eq!(app.chooser().selected_position(), None);
        app.highlight(0).unwrap();
        assert_eq!(app.chooser().selected_position(), Some(0));
        assert!(app.chooser().surface().last_shown.is_none());
    }

    #[test]
    fn set_commits_once_and_reports_ok() {
        let (mut app, setter) = app();
        assert_eq!(app.set_index(5).unwrap(), ScreenResult::Ok);
        assert_eq!(app.tap(), CommitOutcome::Ignored);
        assert_eq!(setter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_drawable_dir_reports_every_builtin() {
        let temp = tempfile::TempDir::new().unwrap();
        let resources = wallchooser_core::DirectoryResources::new(temp.path());
        assert_eq!(
            report_missing_builtins(&resources),
            wallchooser_core::BUILTIN_WALLPAPERS.len()
        );

        for name in wallchooser_core::BUILTIN_WALLPAPERS {
            std::fs::write(temp.path().join(format!("{name}.jpg")), b"full").unwrap();
            std::fs::write(temp.path().join(format!("{name}_small.jpg")), b"thumb").unwrap();
        }
        assert_eq!(report_missing_builtins(&resources), 0);
    }

    #[test]
    fn highlight_out_of_range_is_rejected() {
        let (mut app, setter) = app();
        assert!(app.set_index(999).is_err());
        assert_eq!(setter.0.load(Ordering::SeqCst), 0);
    }
}
