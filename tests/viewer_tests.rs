use photo_gallery::gallery::GalleryState;
use photo_gallery::model::{PhotoRecord, SizeBucket};
use photo_gallery::viewer::ViewerSelection;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn open_rejects_out_of_range_indices() {
    let mut viewer = ViewerSelection::default();
    let visible = ids(&["a", "b", "c"]);

    assert!(!viewer.open(3, &visible));
    assert!(!viewer.is_open());

    assert!(viewer.open(2, &visible));
    assert!(viewer.is_open());
    assert_eq!(viewer.index(), 2);
    assert_eq!(viewer.selected_id(), Some("c"));
}

#[test]
fn open_on_an_empty_list_is_rejected() {
    let mut viewer = ViewerSelection::default();
    assert!(!viewer.open(0, &[]));
    assert!(!viewer.is_open());
}

#[test]
fn close_keeps_the_index() {
    let mut viewer = ViewerSelection::default();
    assert!(viewer.open(1, &ids(&["a", "b"])));
    viewer.close();
    assert!(!viewer.is_open());
    assert_eq!(viewer.index(), 1);
}

#[test]
fn selection_follows_the_photo_when_the_list_reorders() {
    let mut viewer = ViewerSelection::default();
    assert!(viewer.open(0, &ids(&["a", "b", "c"])));

    viewer.reconcile(&ids(&["c", "b", "a"]));
    assert!(viewer.is_open());
    assert_eq!(viewer.index(), 2);
    assert_eq!(viewer.selected_id(), Some("a"));
}

#[test]
fn vanished_photo_clamps_to_the_new_bounds() {
    let mut viewer = ViewerSelection::default();
    assert!(viewer.open(2, &ids(&["a", "b", "c"])));

    viewer.reconcile(&ids(&["a", "b"]));
    assert!(viewer.is_open());
    assert_eq!(viewer.index(), 1);
    assert_eq!(viewer.selected_id(), Some("b"));
}

#[test]
fn empty_derived_list_closes_the_viewer() {
    let mut viewer = ViewerSelection::default();
    assert!(viewer.open(0, &ids(&["a"])));

    viewer.reconcile(&[]);
    assert!(!viewer.is_open());
}

#[test]
fn reconcile_is_a_no_op_while_closed() {
    let mut viewer = ViewerSelection::default();
    viewer.reconcile(&ids(&["a", "b"]));
    assert!(!viewer.is_open());
}

fn photo(id: &str, author: &str, width: u32, height: u32) -> PhotoRecord {
    PhotoRecord {
        id: id.to_owned(),
        author: author.to_owned(),
        width,
        height,
        url: format!("https://unsplash.com/photos/{id}"),
        download_url: format!("https://picsum.photos/id/{id}/{width}/{height}"),
    }
}

#[test]
fn filter_change_under_an_open_viewer_keeps_the_invariant() {
    let mut state = GalleryState::new();
    state.begin_fetch(false);
    state.finish_fetch(Some(vec![
        photo("1", "Ana", 100, 100),
        photo("2", "Bob", 700, 800),
        photo("3", "Cleo", 2000, 2000),
    ]));

    // Viewer on the last visible photo, then a filter drops it.
    assert!(state.open_viewer(2));
    state.set_size_bucket(SizeBucket::Large);
    assert!(state.viewer().is_open());
    assert_eq!(state.viewer().index(), 0);
    assert_eq!(state.viewer().selected_id(), Some("3"));

    // A filter that empties the view closes the viewer.
    state.set_search_text("nobody");
    assert!(!state.viewer().is_open());
}
