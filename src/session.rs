use std::sync::Mutex;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::gallery::GalleryState;
use crate::model::{PhotoRecord, SizeBucket};
use crate::source::PhotoSource;
use crate::store::{PreferenceStore, SettingsBackend};

/// What a `refresh` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetch succeeded and the photo list was replaced wholesale.
    Refreshed,
    /// The fetch failed; the stale list was kept.
    Failed,
    /// Another fetch was in flight; this request was a no-op.
    Coalesced,
}

/// Async orchestration over the gallery core.
///
/// All operations are driven from one UI-style event context: mutations lock
/// the state briefly and never hold the lock across an await. At most one
/// fetch is in flight; preference writes are fire-and-forget and their
/// failures never reach the mutation that triggered them.
pub struct GallerySession<S, B> {
    source: S,
    store: PreferenceStore<B>,
    state: Mutex<GalleryState>,
    pending_writes: Mutex<Vec<JoinHandle<()>>>,
}

impl<S, B> GallerySession<S, B>
where
    S: PhotoSource,
    B: SettingsBackend + Clone,
{
    pub fn new(source: S, store: PreferenceStore<B>) -> Self {
        Self {
            source,
            store,
            state: Mutex::new(GalleryState::new()),
            pending_writes: Mutex::new(Vec::new()),
        }
    }

    /// Runs a closure against the locked core state. Suspension points live
    /// outside; the lock is never held across an await.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut GalleryState) -> T) -> T {
        let mut state = self.state.lock().expect("gallery state poisoned");
        f(&mut state)
    }

    /// Loads both preferences (best effort) and performs the initial fetch.
    /// `loading` is true for the duration and false on every exit path.
    pub async fn initialize(&self) {
        let favorites = self.store.load_favorites().await;
        let theme_dark = self.store.load_theme().await;
        info!(favorites = favorites.len(), theme_dark, "preferences restored");

        let begun = self.with_state(|state| {
            state.restore_preferences(favorites, theme_dark);
            state.begin_fetch(false)
        });
        if !begun {
            debug!("initialize skipped fetch; another is in flight");
            return;
        }

        let outcome = match self.source.fetch().await {
            Ok(photos) => Some(photos),
            Err(err) => {
                warn!(error = %err, "initial fetch failed; gallery stays empty");
                None
            }
        };
        self.with_state(|state| state.finish_fetch(outcome));
    }

    /// Re-fetches the photo list. A request arriving while a fetch is
    /// pending coalesces into a no-op rather than queuing; on failure the
    /// stale list is kept. `refreshing` is false on every exit path.
    pub async fn refresh(&self) -> RefreshOutcome {
        if !self.with_state(|state| state.begin_fetch(true)) {
            debug!("refresh coalesced; fetch already in flight");
            return RefreshOutcome::Coalesced;
        }
        match self.source.fetch().await {
            Ok(photos) => {
                info!(count = photos.len(), "refresh replaced photo list");
                self.with_state(|state| state.finish_fetch(Some(photos)));
                RefreshOutcome::Refreshed
            }
            Err(err) => {
                warn!(error = %err, "refresh failed; keeping stale photos");
                self.with_state(|state| state.finish_fetch(None));
                RefreshOutcome::Failed
            }
        }
    }

    /// Toggles a favorite in memory, then persists the new map without
    /// blocking the caller. A failed write is logged and swallowed; the
    /// in-memory map stays authoritative for the session.
    pub fn toggle_favorite(&self, photo: &PhotoRecord) {
        let snapshot = self.with_state(|state| state.toggle_favorite(photo));
        let store = self.store.clone();
        self.track_write(tokio::spawn(async move {
            if let Err(err) = store.save_favorites(&snapshot).await {
                warn!(error = %err, "favorites write failed; keeping in-memory state");
            }
        }));
    }

    /// Flips the theme and persists it fire-and-forget. Returns the new flag.
    pub fn toggle_theme(&self) -> bool {
        let dark = self.with_state(|state| state.toggle_theme());
        let store = self.store.clone();
        self.track_write(tokio::spawn(async move {
            if let Err(err) = store.save_theme(dark).await {
                warn!(error = %err, "theme write failed; keeping in-memory state");
            }
        }));
        dark
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.with_state(|state| state.set_search_text(text));
    }

    pub fn set_size_bucket(&self, bucket: SizeBucket) {
        self.with_state(|state| state.set_size_bucket(bucket));
    }

    pub fn set_favorites_only(&self, on: bool) {
        self.with_state(|state| state.set_favorites_only(on));
    }

    pub fn visible_photos(&self) -> Vec<PhotoRecord> {
        self.with_state(|state| state.visible_photos().into_iter().cloned().collect())
    }

    pub fn find_photo(&self, id: &str) -> Option<PhotoRecord> {
        self.with_state(|state| state.photos().iter().find(|p| p.id == id).cloned())
    }

    pub fn open_viewer(&self, index: usize) -> bool {
        self.with_state(|state| state.open_viewer(index))
    }

    pub fn close_viewer(&self) {
        self.with_state(|state| state.close_viewer());
    }

    /// Waits for outstanding preference writes. Write errors were already
    /// swallowed at spawn; a panicked write must not surface here either.
    pub async fn flush_writes(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut pending = self.pending_writes.lock().expect("write queue poisoned");
            pending.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    fn track_write(&self, handle: JoinHandle<()>) {
        self.pending_writes
            .lock()
            .expect("write queue poisoned")
            .push(handle);
    }
}
