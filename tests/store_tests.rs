use photo_gallery::error::StorageError;
use photo_gallery::model::{FavoritesMap, PhotoRecord};
use photo_gallery::store::{
    FAVORITES_SLOT, FileBackend, PreferenceStore, SettingsBackend, THEME_SLOT,
};

fn photo(id: &str, author: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_owned(),
        author: author.to_owned(),
        width: 640,
        height: 480,
        url: format!("https://unsplash.com/photos/{id}"),
        download_url: format!("https://picsum.photos/id/{id}/640/480"),
    }
}

#[tokio::test]
async fn favorites_round_trip_through_the_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(FileBackend::new(dir.path()));

    let mut favorites = FavoritesMap::new();
    favorites.insert("12".to_owned(), photo("12", "Paul Jarvis"));
    favorites.insert("3".to_owned(), photo("3", "Alejandro Escamilla"));

    store.save_favorites(&favorites).await.unwrap();
    assert_eq!(store.load_favorites().await, favorites);
}

#[tokio::test]
async fn missing_slots_yield_first_run_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(FileBackend::new(dir.path()));

    assert!(store.load_favorites().await.is_empty());
    assert!(store.load_theme().await, "theme must default to dark");
}

#[tokio::test]
async fn corrupt_favorites_fall_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(FAVORITES_SLOT), "{not json").unwrap();

    let store = PreferenceStore::new(FileBackend::new(dir.path()));
    assert!(store.load_favorites().await.is_empty());
}

#[tokio::test]
async fn mismatched_favorite_keys_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let mut favorites = FavoritesMap::new();
    favorites.insert("1".to_owned(), photo("1", "Ana"));
    favorites.insert("99".to_owned(), photo("2", "Bob"));
    std::fs::write(
        dir.path().join(FAVORITES_SLOT),
        serde_json::to_string(&favorites).unwrap(),
    )
    .unwrap();

    let store = PreferenceStore::new(FileBackend::new(dir.path()));
    let loaded = store.load_favorites().await;
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key("1"));
}

#[tokio::test]
async fn theme_persists_as_a_single_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(FileBackend::new(dir.path()));

    store.save_theme(false).await.unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join(THEME_SLOT)).unwrap(),
        "0"
    );
    assert!(!store.load_theme().await);

    store.save_theme(true).await.unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join(THEME_SLOT)).unwrap(),
        "1"
    );
    assert!(store.load_theme().await);
}

#[tokio::test]
async fn unrecognized_theme_token_defaults_to_dark() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(THEME_SLOT), "maybe").unwrap();

    let store = PreferenceStore::new(FileBackend::new(dir.path()));
    assert!(store.load_theme().await);
}

/// Backend whose reads and writes always fail.
#[derive(Clone)]
struct BrokenBackend;

impl SettingsBackend for BrokenBackend {
    async fn get(&self, _slot: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(std::io::Error::other("backend offline")))
    }

    async fn set(&self, _slot: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("backend offline")))
    }
}

#[tokio::test]
async fn read_failures_soft_fail_to_defaults() {
    let store = PreferenceStore::new(BrokenBackend);
    assert!(store.load_favorites().await.is_empty());
    assert!(store.load_theme().await);
}

#[tokio::test]
async fn write_failures_surface_a_storage_error() {
    let store = PreferenceStore::new(BrokenBackend);
    assert!(store.save_favorites(&FavoritesMap::new()).await.is_err());
    assert!(store.save_theme(false).await.is_err());
}
