use crate::catalog::Catalog;
use crate::services::ResourceId;

/// Supplies cells to a scrolling list host.
pub trait ListSource {
    type Cell;

    fn count(&self) -> usize;
    fn item(&self, position: usize) -> usize;
    fn item_id(&self, position: usize) -> u64;

    /// Render the cell at `position`, reusing `recycled` when the host
    /// offers a cell that scrolled out of view.
    fn render_cell(&self, position: usize, recycled: Option<Self::Cell>) -> Self::Cell;
}

/// A gallery cell showing one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailCell {
    pub image: ResourceId,
    pub dither: bool,
    /// How many times this cell has been re-pointed at another thumbnail.
    pub rebinds: usize,
}

impl ThumbnailCell {
    fn inflate(image: ResourceId) -> Self {
        Self {
            image,
            dither: false,
            rebinds: 0,
        }
    }
}

pub struct ImageAdapter<'a> {
    catalog: &'a Catalog,
}

impl<'a> ImageAdapter<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl ListSource for ImageAdapter<'_> {
    type Cell = ThumbnailCell;

    fn count(&self) -> usize {
        self.catalog.len()
    }

    fn item(&self, position: usize) -> usize {
        position
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn render_cell(&self, position: usize, recycled: Option<ThumbnailCell>) -> ThumbnailCell {
        let thumb = self.catalog.thumbnails()[position].clone();
        let mut cell = match recycled {
            Some(mut cell) => {
                cell.image = thumb;
                cell.rebinds += 1;
                cell
            }
            None => ThumbnailCell::inflate(thumb),
        };
        cell.dither = true;
        cell
    }
}
