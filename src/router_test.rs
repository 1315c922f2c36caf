use super::*;

const MARKER_COMBOS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

fn target(path: &str) -> RouteMatch {
    find_route(path).unwrap_or_else(|| panic!("no route for {path}"))
}

fn signed_in() -> SessionMarkers {
    SessionMarkers::new(Some("abc".into()), Some(r#"{"username":"amy"}"#.into()))
}

/// Concrete path for a descriptor, filling `:params` with `7`.
fn concrete(route: &RouteDescriptor) -> String {
    route
        .path
        .split('/')
        .map(|seg| if seg.starts_with(':') { "7" } else { seg })
        .collect::<Vec<_>>()
        .join("/")
}

// =============================================================
// Route table
// =============================================================

#[test]
fn every_route_name_is_in_the_table_once() {
    for route in routes() {
        let count = routes().iter().filter(|r| r.name == route.name).count();
        assert_eq!(count, 1, "{:?}", route.name);
    }
}

#[test]
fn only_login_and_register_are_public() {
    let public: Vec<_> = routes().iter().filter(|r| !r.requires_auth).map(|r| r.name).collect();
    assert_eq!(public, vec![RouteName::Login, RouteName::Register]);
}

#[test]
fn keep_alive_pages() {
    let kept: Vec<_> = routes().iter().filter(|r| r.keep_alive).map(|r| r.path).collect();
    assert_eq!(kept, vec!["/home", "/diet/list", "/weight/list", "/report/list"]);
}

#[test]
fn every_descriptor_matches_its_own_concrete_path() {
    for route in routes() {
        let m = target(&concrete(route));
        assert_eq!(m.route, route);
    }
}

#[test]
fn param_segments_are_captured() {
    let m = target("/diet/detail/42");
    assert_eq!(m.route.name, RouteName::DietDetail);
    assert_eq!(m.param("id"), Some("42"));
    assert_eq!(m.param("other"), None);
}

#[test]
fn query_and_fragment_are_ignored_for_matching() {
    let m = target("/report/detail/3?from=list#advice");
    assert_eq!(m.route.name, RouteName::ReportDetail);
    assert_eq!(m.full_path, "/report/detail/3?from=list#advice");
    assert_eq!(m.query("from").as_deref(), Some("list"));
}

#[test]
fn trailing_slash_matches() {
    assert_eq!(target("/weight/list/").route.name, RouteName::WeightList);
}

#[test]
fn matching_ignores_ascii_case() {
    assert_eq!(target("/Diet/List").route.name, RouteName::DietList);
    let m = target("/DIET/detail/AbC");
    assert_eq!(m.route.name, RouteName::DietDetail);
    assert_eq!(m.param("id"), Some("AbC"));
}

#[test]
fn mixed_case_protected_path_is_guarded() {
    assert_eq!(
        navigate("/Diet/List", &SessionMarkers::default()),
        Navigation::Redirected {
            to: "/login?redirect=/Diet/List".into()
        }
    );
}

#[test]
fn nested_user_path_is_not_the_profile_page() {
    assert_eq!(target("/user").route.name, RouteName::User);
    assert_eq!(target("/user/goal-settings").route.name, RouteName::GoalSettings);
}

#[test]
fn unknown_paths_do_not_match() {
    assert!(find_route("/nope").is_none());
    assert!(find_route("/diet/detail").is_none());
    assert!(find_route("/diet/detail/1/extra").is_none());
}

// =============================================================
// decide: properties
// =============================================================

#[test]
fn public_routes_allow_unauthenticated_users() {
    for route in routes().iter().filter(|r| !r.requires_auth) {
        let t = target(route.path);
        for (has_token, has_user_info) in MARKER_COMBOS {
            if has_token && has_user_info {
                continue;
            }
            assert_eq!(
                decide(&t, has_token, has_user_info),
                Outcome::Allow { title: route.title.unwrap_or(DEFAULT_TITLE) },
            );
        }
    }
}

#[test]
fn protected_routes_without_both_markers_redirect_to_login() {
    for route in routes().iter().filter(|r| r.requires_auth) {
        let path = concrete(route);
        let t = target(&path);
        for (has_token, has_user_info) in MARKER_COMBOS {
            if has_token && has_user_info {
                continue;
            }
            assert_eq!(
                decide(&t, has_token, has_user_info),
                Outcome::Redirect { to: format!("/login?redirect={path}") },
                "{path} token={has_token} info={has_user_info}"
            );
        }
    }
}

#[test]
fn protected_routes_with_both_markers_are_allowed() {
    for route in routes().iter().filter(|r| r.requires_auth) {
        let t = target(&concrete(route));
        assert!(matches!(decide(&t, true, true), Outcome::Allow { .. }));
    }
}

#[test]
fn auth_pages_send_signed_in_users_home() {
    for path in [LOGIN_PATH, REGISTER_PATH] {
        assert_eq!(
            decide(&target(path), true, true),
            Outcome::Redirect { to: HOME_PATH.to_string() }
        );
    }
}

#[test]
fn allowed_navigation_carries_route_title() {
    assert_eq!(decide(&target("/chat"), true, true), Outcome::Allow { title: "AI Chat" });
}

#[test]
fn missing_title_falls_back_to_default() {
    static UNTITLED: RouteDescriptor = RouteDescriptor {
        path: "/untitled",
        name: RouteName::Knowledge,
        title: None,
        requires_auth: false,
        keep_alive: false,
    };
    let t = RouteMatch {
        route: &UNTITLED,
        full_path: "/untitled".into(),
        params: Vec::new(),
    };
    assert_eq!(decide(&t, false, false), Outcome::Allow { title: DEFAULT_TITLE });
}

// =============================================================
// decide: scenarios
// =============================================================

#[test]
fn diet_list_without_session_goes_to_login_with_redirect() {
    assert_eq!(
        decide(&target("/diet/list"), false, false),
        Outcome::Redirect { to: "/login?redirect=/diet/list".into() }
    );
}

#[test]
fn login_with_session_goes_home() {
    assert_eq!(
        decide(&target("/login"), true, true),
        Outcome::Redirect { to: "/home".into() }
    );
}

#[test]
fn register_without_token_is_allowed() {
    assert_eq!(decide(&target("/register"), false, true), Outcome::Allow { title: "Sign Up" });
}

#[test]
fn redirect_preserves_query_of_original_path() {
    assert_eq!(
        decide(&target("/report/detail/9?tab=advice&x=1"), true, false),
        Outcome::Redirect { to: "/login?redirect=/report/detail/9?tab=advice%26x=1".into() }
    );
}

// =============================================================
// navigate / settle
// =============================================================

#[test]
fn root_redirects_to_login() {
    assert_eq!(
        navigate("/", &SessionMarkers::default()),
        Navigation::Redirected { to: LOGIN_PATH.into() }
    );
}

#[test]
fn navigate_uses_session_markers() {
    assert!(matches!(
        navigate("/home", &signed_in()),
        Navigation::Allowed { title: "Home", .. }
    ));
    let half = SessionMarkers::new(Some("abc".into()), None);
    assert_eq!(
        navigate("/home", &half),
        Navigation::Redirected { to: "/login?redirect=/home".into() }
    );
}

#[test]
fn navigate_to_unknown_path_is_not_found() {
    assert_eq!(
        navigate("/missing", &signed_in()),
        Navigation::NotFound { path: "/missing".into() }
    );
}

#[test]
fn settle_root_lands_on_login_when_signed_out() {
    match settle("/", &SessionMarkers::default()) {
        Navigation::Allowed { route, title } => {
            assert_eq!(route.route.name, RouteName::Login);
            assert_eq!(title, "Sign In");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn settle_root_lands_home_when_signed_in() {
    assert!(matches!(
        settle("/", &signed_in()),
        Navigation::Allowed { ref route, .. } if route.route.name == RouteName::Home
    ));
}

#[test]
fn settle_protected_page_keeps_redirect_on_login_route() {
    match settle("/weight/list", &SessionMarkers::default()) {
        Navigation::Allowed { route, .. } => {
            assert_eq!(route.route.name, RouteName::Login);
            assert_eq!(redirect_target(&route.full_path), "/weight/list");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// =============================================================
// Redirect encoding
// =============================================================

#[test]
fn encode_keeps_slashes_readable() {
    assert_eq!(encode_query_value("/diet/list"), "/diet/list");
}

#[test]
fn encode_escapes_query_breaking_characters() {
    assert_eq!(encode_query_value("a&b#c+d e%"), "a%26b%23c%2Bd%20e%25");
}

#[test]
fn decode_reverses_encode_for_unicode() {
    let original = "/knowledge?q=蛋白质 & more";
    assert_eq!(decode_query_value(&encode_query_value(original)), original);
}

#[test]
fn decode_keeps_malformed_escapes() {
    assert_eq!(decode_query_value("100%"), "100%");
    assert_eq!(decode_query_value("%zz"), "%zz");
    assert_eq!(decode_query_value("a+b"), "a b");
}

#[test]
fn redirect_target_reads_login_query() {
    assert_eq!(redirect_target("/login?redirect=/diet/list"), "/diet/list");
    assert_eq!(redirect_target(&login_redirect("/report/detail/3?tab=x&y=2")), "/report/detail/3?tab=x&y=2");
}

#[test]
fn redirect_target_defaults_home() {
    assert_eq!(redirect_target("/login"), HOME_PATH);
    assert_eq!(redirect_target("/login?redirect="), HOME_PATH);
}

#[test]
fn redirect_target_rejects_foreign_locations() {
    assert_eq!(redirect_target("/login?redirect=https://evil.example"), HOME_PATH);
    assert_eq!(redirect_target("/login?redirect=//evil.example/x"), HOME_PATH);
}
