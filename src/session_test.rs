use super::*;

fn markers(token: Option<&str>, user_info: Option<&str>) -> SessionMarkers {
    SessionMarkers::new(token.map(str::to_string), user_info.map(str::to_string))
}

// =============================================================
// SessionMarkers
// =============================================================

#[test]
fn default_markers_are_not_authenticated() {
    let m = SessionMarkers::default();
    assert!(!m.has_token());
    assert!(!m.has_user_info());
    assert!(!m.is_authenticated());
}

#[test]
fn both_markers_mean_authenticated() {
    assert!(markers(Some("abc"), Some("{}")).is_authenticated());
}

#[test]
fn one_marker_is_not_enough() {
    assert!(!markers(Some("abc"), None).is_authenticated());
    assert!(!markers(None, Some("{}")).is_authenticated());
}

#[test]
fn empty_strings_count_as_missing() {
    let m = markers(Some(""), Some(""));
    assert!(!m.has_token());
    assert!(!m.has_user_info());
}

// =============================================================
// SessionStore
// =============================================================

#[test]
fn load_from_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("never-created"));
    assert_eq!(store.load().unwrap(), SessionMarkers::default());
}

#[test]
fn save_then_load_returns_same_markers() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session"));
    let saved = markers(Some("tok-123"), Some(r#"{"username":"amy"}"#));
    store.save(&saved).unwrap();
    assert_eq!(store.load().unwrap(), saved);
}

#[test]
fn markers_are_stored_under_their_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&markers(Some("tok"), Some("info"))).unwrap();
    assert_eq!(std::fs::read_to_string(dir.path().join("token")).unwrap(), "tok");
    assert_eq!(std::fs::read_to_string(dir.path().join("userInfo")).unwrap(), "info");
}

#[test]
fn saving_absent_marker_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&markers(Some("tok"), Some("info"))).unwrap();
    store.save(&markers(Some("tok"), None)).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.token.as_deref(), Some("tok"));
    assert!(loaded.user_info.is_none());
    assert!(!dir.path().join("userInfo").exists());
}

#[test]
fn clear_removes_both_markers() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&markers(Some("tok"), Some("info"))).unwrap();
    store.clear().unwrap();
    assert!(!store.load().unwrap().is_authenticated());
}

#[test]
fn clear_on_empty_store_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    SessionStore::new(dir.path()).clear().unwrap();
}

#[test]
fn whitespace_only_file_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("token"), "  \n").unwrap();
    let store = SessionStore::new(dir.path());
    assert!(store.load().unwrap().token.is_none());
}
