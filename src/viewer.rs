/// Selection state for the full-screen carousel.
///
/// The index always refers to the derived visible list, never the raw fetch:
/// opening index 3 means the 3rd item of the currently filtered view. While
/// open, `index < visible.len()` holds; `reconcile` re-establishes it after
/// every change to the derived list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerSelection {
    open: bool,
    index: usize,
    photo_id: Option<String>,
}

impl ViewerSelection {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index into the derived list; meaningful only while open.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.photo_id.as_deref()
    }

    /// Opens the viewer at `index` of the derived list. Out-of-range indices
    /// are rejected so the invariant holds from the first frame.
    pub fn open(&mut self, index: usize, visible_ids: &[String]) -> bool {
        let Some(id) = visible_ids.get(index) else {
            return false;
        };
        self.open = true;
        self.index = index;
        self.photo_id = Some(id.clone());
        true
    }

    /// Closes the viewer. The index is not reset; reopening re-resolves it.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Re-establishes the invariant after the derived list changed.
    ///
    /// The selection follows the photo, not the slot: if the previously
    /// selected id is still visible the index moves with it. A vanished photo
    /// clamps the index to the new bounds, and an empty list closes the
    /// viewer.
    pub fn reconcile(&mut self, visible_ids: &[String]) {
        if !self.open {
            return;
        }
        if visible_ids.is_empty() {
            self.open = false;
            return;
        }
        if let Some(id) = self.photo_id.as_deref() {
            if let Some(pos) = visible_ids.iter().position(|v| v == id) {
                self.index = pos;
                return;
            }
        }
        self.index = self.index.min(visible_ids.len() - 1);
        self.photo_id = Some(visible_ids[self.index].clone());
    }
}
