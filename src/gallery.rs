use crate::model::{FavoritesMap, FilterState, PhotoRecord, SizeBucket};
use crate::viewer::ViewerSelection;

/// The gallery core: one owned state object with explicit mutation methods
/// and a pure derivation of the visible list.
///
/// Holds the fetched snapshot, the favorites map, the active filters, the
/// theme flag and the fetch-lifecycle flags. The viewer selection lives here
/// too, so every mutation that can change the derived list re-establishes
/// its index invariant before returning.
#[derive(Debug)]
pub struct GalleryState {
    photos: Vec<PhotoRecord>,
    favorites: FavoritesMap,
    filter: FilterState,
    theme_dark: bool,
    loading: bool,
    refreshing: bool,
    viewer: ViewerSelection,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            photos: Vec::new(),
            favorites: FavoritesMap::new(),
            filter: FilterState::default(),
            theme_dark: true,
            loading: false,
            refreshing: false,
            viewer: ViewerSelection::default(),
        }
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn favorites(&self) -> &FavoritesMap {
        &self.favorites
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn theme_dark(&self) -> bool {
        self.theme_dark
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn viewer(&self) -> &ViewerSelection {
        &self.viewer
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains_key(id)
    }

    /// Installs preferences loaded from storage.
    pub fn restore_preferences(&mut self, favorites: FavoritesMap, theme_dark: bool) {
        self.favorites = favorites;
        self.theme_dark = theme_dark;
        self.reconcile_viewer();
    }

    /// Claims the single in-flight fetch slot. Returns false when a fetch is
    /// already pending; the caller must then coalesce rather than queue.
    pub fn begin_fetch(&mut self, refresh: bool) -> bool {
        if self.loading || self.refreshing {
            return false;
        }
        if refresh {
            self.refreshing = true;
        } else {
            self.loading = true;
        }
        true
    }

    /// Clears the fetch flags and applies the outcome. `None` keeps the
    /// stale list: stale-but-present beats empty.
    pub fn finish_fetch(&mut self, outcome: Option<Vec<PhotoRecord>>) {
        self.loading = false;
        self.refreshing = false;
        if let Some(photos) = outcome {
            self.photos = photos;
            self.reconcile_viewer();
        }
    }

    /// Inserts the photo into favorites, or removes it when already present.
    /// Returns a snapshot of the new map for persistence.
    pub fn toggle_favorite(&mut self, photo: &PhotoRecord) -> FavoritesMap {
        if self.favorites.remove(&photo.id).is_none() {
            self.favorites.insert(photo.id.clone(), photo.clone());
        }
        self.reconcile_viewer();
        self.favorites.clone()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
        self.reconcile_viewer();
    }

    pub fn set_size_bucket(&mut self, bucket: SizeBucket) {
        self.filter.size_bucket = bucket;
        self.reconcile_viewer();
    }

    pub fn set_favorites_only(&mut self, on: bool) {
        self.filter.favorites_only = on;
        self.reconcile_viewer();
    }

    /// Flips the theme flag and returns the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.theme_dark = !self.theme_dark;
        self.theme_dark
    }

    /// The derived visible list, recomputed from `(photos, favorites,
    /// filter)` on every call. The three stages are independent predicates;
    /// the order is a performance detail, the AND is the contract.
    pub fn visible_photos(&self) -> Vec<&PhotoRecord> {
        self.photos
            .iter()
            .filter(|p| !self.filter.favorites_only || self.favorites.contains_key(&p.id))
            .filter(|p| self.filter.size_bucket.admits(p.area()))
            .filter(|p| self.filter.matches_author(&p.author))
            .collect()
    }

    /// Opens the viewer at an index of the current derived list.
    pub fn open_viewer(&mut self, index: usize) -> bool {
        let visible_ids = self.visible_ids();
        self.viewer.open(index, &visible_ids)
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    fn visible_ids(&self) -> Vec<String> {
        self.visible_photos().iter().map(|p| p.id.clone()).collect()
    }

    fn reconcile_viewer(&mut self) {
        let visible_ids = self.visible_ids();
        self.viewer.reconcile(&visible_ids);
    }
}
