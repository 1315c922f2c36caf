use std::path::Path;

use super::*;
use crate::router::find_route;
use crate::session::{TOKEN_KEY, USER_INFO_KEY};

fn signed_in_app(dir: &Path) -> App {
    let store = SessionStore::new(dir);
    store
        .save(&SessionMarkers::new(
            Some("abc".into()),
            Some(r#"{"username":"amy","userId":5}"#.into()),
        ))
        .unwrap();
    let api = ApiClient::new("http://localhost:8088", Duration::from_secs(5)).unwrap();
    App::new(api, store).unwrap()
}

fn route(path: &str) -> RouteMatch {
    find_route(path).unwrap_or_else(|| panic!("no route for {path}"))
}

fn unauthorized() -> anyhow::Error {
    ClientError::Status {
        status: StatusCode::UNAUTHORIZED,
        body: String::new(),
    }
    .into()
}

#[test]
fn stored_session_restores_token() {
    let dir = tempfile::tempdir().unwrap();
    let app = signed_in_app(dir.path());
    assert!(app.api.has_token());
    assert!(app.markers.is_authenticated());
    assert_eq!(app.user_id(), Some(5));
}

// =============================================================
// recover
// =============================================================

#[test]
fn unauthorized_signs_out_and_returns_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());

    let next = recover(&mut app, &route("/diet/list"), unauthorized()).unwrap();

    assert_eq!(next, "/login?redirect=/diet/list");
    assert_eq!(router::redirect_target(&next), "/diet/list");
    assert!(!dir.path().join(TOKEN_KEY).exists());
    assert!(!dir.path().join(USER_INFO_KEY).exists());
    assert!(!app.api.has_token());
    assert!(!app.markers.is_authenticated());
}

#[test]
fn unauthorized_keeps_query_of_current_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());

    let next = recover(&mut app, &route("/report/detail/3?tab=advice"), unauthorized()).unwrap();

    assert_eq!(router::redirect_target(&next), "/report/detail/3?tab=advice");
}

#[test]
fn rejected_request_keeps_session_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());
    let err = ClientError::Rejected {
        code: 500,
        message: "report not found".into(),
    };

    let next = recover(&mut app, &route("/report/detail/3"), err.into()).unwrap();

    assert_eq!(next, "/report/list");
    assert!(dir.path().join(TOKEN_KEY).exists());
    assert!(app.api.has_token());
}

#[test]
fn non_numeric_id_falls_back_to_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());
    let target = route("/diet/detail/abc");

    let err = id_param(&target).unwrap_err();
    assert_eq!(err.to_string(), "invalid id `abc` in /diet/detail/abc");

    let next = recover(&mut app, &target, err.into()).unwrap();
    assert_eq!(next, "/diet/list");
    assert!(app.api.has_token());
}

#[test]
fn numeric_id_is_parsed() {
    assert_eq!(id_param(&route("/report/detail/12")).unwrap(), 12);
}

#[test]
fn unreadable_image_falls_back_home() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());
    let missing = dir.path().join("missing.png");

    let err = food::read_image(&missing).unwrap_err();
    match &err {
        ClientError::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other:?}"),
    }

    let next = recover(&mut app, &route("/food/analysis"), err.into()).unwrap();
    assert_eq!(next, HOME_PATH);
}

#[test]
fn other_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = signed_in_app(dir.path());

    let result = recover(&mut app, &route("/home"), anyhow::anyhow!("terminal closed"));

    assert!(result.is_err());
    assert!(app.api.has_token());
}
