use crate::models::portfolio::{ImageOrder, PortfolioImage, ReorderRequest};

/// Local ordering of a portfolio's persisted images, committed in one
/// batch with [`ImageReorder::order_request`].
///
/// Invariant: after any move, `images[i].order == i` for every position.
#[derive(Debug, Clone)]
pub struct ImageReorder {
    portfolio_id: u64,
    images: Vec<PortfolioImage>,
    saved: Vec<u64>,
}

impl ImageReorder {
    pub fn new(portfolio_id: u64, mut images: Vec<PortfolioImage>) -> Self {
        images.sort_by_key(|img| img.order);
        let saved = images.iter().map(|img| img.id).collect();
        Self {
            portfolio_id,
            images,
            saved,
        }
    }

    pub fn portfolio_id(&self) -> u64 {
        self.portfolio_id
    }

    pub fn images(&self) -> &[PortfolioImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image shown as cover (position 0).
    pub fn cover(&self) -> Option<&PortfolioImage> {
        self.images.first()
    }

    /// Move the image at `from` to position `to`. Out-of-range or no-op
    /// moves return `false` and leave the list untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.images.len() || to >= self.images.len() {
            return false;
        }
        let item = self.images.remove(from);
        self.images.insert(to, item);
        self.renumber();
        true
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        index > 0 && self.move_item(index, index - 1)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        index
            .checked_add(1)
            .is_some_and(|to| self.move_item(index, to))
    }

    pub fn move_to_top(&mut self, index: usize) -> bool {
        self.move_item(index, 0)
    }

    pub fn move_to_bottom(&mut self, index: usize) -> bool {
        match self.images.len() {
            0 => false,
            len => self.move_item(index, len - 1),
        }
    }

    pub fn position_of(&self, image_id: u64) -> Option<usize> {
        self.images.iter().position(|img| img.id == image_id)
    }

    /// Splice out an image the backend has deleted.
    pub fn remove_image(&mut self, image_id: u64) -> Option<PortfolioImage> {
        let index = self.position_of(image_id)?;
        let removed = self.images.remove(index);
        self.saved.retain(|id| *id != image_id);
        self.renumber();
        Some(removed)
    }

    fn renumber(&mut self) {
        for (i, img) in self.images.iter_mut().enumerate() {
            img.order = i as u32;
        }
    }

    /// `true` when the sequence differs from the last loaded or saved one.
    pub fn is_dirty(&self) -> bool {
        self.images
            .iter()
            .map(|img| img.id)
            .ne(self.saved.iter().copied())
    }

    /// Full id → position mapping for the current sequence.
    pub fn order_request(&self) -> ReorderRequest {
        ReorderRequest {
            portofolio_id: self.portfolio_id,
            orders: self
                .images
                .iter()
                .enumerate()
                .map(|(i, img)| ImageOrder {
                    id: img.id,
                    order: i as u32,
                })
                .collect(),
        }
    }

    /// Record the current sequence as persisted.
    pub fn mark_saved(&mut self) {
        self.renumber();
        self.saved = self.images.iter().map(|img| img.id).collect();
    }
}
