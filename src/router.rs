// Route table and navigation guard.
//
// Every page of the client is described by a static [`RouteDescriptor`].
// Before a page is shown, [`decide`] looks at the target descriptor and
// the session markers and either lets the navigation through or bounces
// it:
//
// - signed-in users asking for the login or registration page go home,
// - signed-out users asking for a protected page go to the login page,
//   with the page they wanted carried along in `?redirect=`,
// - everything else is allowed and gets its display title.
//
// The guard never touches storage; callers pass the markers in.

use tracing::{debug, info};

use crate::session::SessionMarkers;

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

pub const ROOT_PATH: &str = "/";
pub const HOME_PATH: &str = "/home";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const REDIRECT_PARAM: &str = "redirect";

/// Title used when a route does not set one.
pub const DEFAULT_TITLE: &str = "Nutrition Health Manager";

/// Upper bound on guard redirects followed by [`settle`].
pub const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Chat,
    DietList,
    DietAdd,
    DietEdit,
    DietDetail,
    WeightList,
    ReportList,
    ReportDetail,
    AssessmentList,
    GoalSettings,
    FoodAnalysis,
    Knowledge,
    User,
    Login,
    Register,
}

impl RouteName {
    /// Pages a signed-in user has no business on.
    pub fn is_auth_page(self) -> bool {
        matches!(self, RouteName::Login | RouteName::Register)
    }
}

/// Static metadata of one navigable path. `:name` segments in `path`
/// match any single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: RouteName,
    pub title: Option<&'static str>,
    pub requires_auth: bool,
    /// Page state is kept when navigating away.
    pub keep_alive: bool,
}

const fn protected(path: &'static str, name: RouteName, title: &'static str, keep_alive: bool) -> RouteDescriptor {
    RouteDescriptor {
        path,
        name,
        title: Some(title),
        requires_auth: true,
        keep_alive,
    }
}

const fn public(path: &'static str, name: RouteName, title: &'static str) -> RouteDescriptor {
    RouteDescriptor {
        path,
        name,
        title: Some(title),
        requires_auth: false,
        keep_alive: false,
    }
}

static ROUTES: [RouteDescriptor; 16] = [
    protected("/home", RouteName::Home, "Home", true),
    protected("/chat", RouteName::Chat, "AI Chat", false),
    protected("/diet/list", RouteName::DietList, "Diet Diary", true),
    protected("/diet/add", RouteName::DietAdd, "Add Meal", false),
    protected("/diet/edit/:id", RouteName::DietEdit, "Edit Meal", false),
    protected("/diet/detail/:id", RouteName::DietDetail, "Meal Detail", false),
    protected("/weight/list", RouteName::WeightList, "Weight Tracking", true),
    protected("/report/list", RouteName::ReportList, "Nutrition Reports", true),
    protected("/report/detail/:id", RouteName::ReportDetail, "Report Detail", false),
    protected("/assessment/list", RouteName::AssessmentList, "Health Assessment", false),
    protected("/user/goal-settings", RouteName::GoalSettings, "Goal Settings", false),
    protected("/food/analysis", RouteName::FoodAnalysis, "Food Recognition", false),
    protected("/knowledge", RouteName::Knowledge, "Nutrition Knowledge", false),
    protected("/user", RouteName::User, "My Profile", false),
    public(LOGIN_PATH, RouteName::Login, "Sign In"),
    public(REGISTER_PATH, RouteName::Register, "Sign Up"),
];

pub fn routes() -> &'static [RouteDescriptor] {
    &ROUTES
}

/// A descriptor matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDescriptor,
    /// Requested path including its query string.
    pub full_path: String,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query(&self, key: &str) -> Option<String> {
        query_value(&self.full_path, key)
    }
}

/// Outcome of the guard for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allow { title: &'static str },
    Redirect { to: String },
}

/// The navigation guard.
pub fn decide(target: &RouteMatch, has_token: bool, has_user_info: bool) -> Outcome {
    let route = target.route;
    let authenticated = has_token && has_user_info;
    debug!(
        to = ?route.name,
        has_token,
        has_user_info,
        authenticated,
        requires_auth = route.requires_auth,
        "route guard"
    );

    if route.name.is_auth_page() && authenticated {
        return Outcome::Redirect {
            to: HOME_PATH.to_string(),
        };
    }

    if route.requires_auth && !authenticated {
        info!(to = %target.full_path, "not signed in, redirecting to login");
        return Outcome::Redirect {
            to: login_redirect(&target.full_path),
        };
    }

    Outcome::Allow {
        title: route.title.unwrap_or(DEFAULT_TITLE),
    }
}

/// Result of [`navigate`]: a page to show, a hop to follow, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed { route: RouteMatch, title: &'static str },
    Redirected { to: String },
    NotFound { path: String },
}

/// Resolve `full_path` and run the guard once.
pub fn navigate(full_path: &str, session: &SessionMarkers) -> Navigation {
    let (path, _) = split_full_path(full_path);
    if normalize(path) == ROOT_PATH {
        return Navigation::Redirected {
            to: LOGIN_PATH.to_string(),
        };
    }
    let Some(target) = find_route(full_path) else {
        debug!(path = full_path, "no route");
        return Navigation::NotFound {
            path: full_path.to_string(),
        };
    };
    match decide(&target, session.has_token(), session.has_user_info()) {
        Outcome::Allow { title } => Navigation::Allowed { route: target, title },
        Outcome::Redirect { to } => Navigation::Redirected { to },
    }
}

/// Like [`navigate`], following redirects until a page (or nothing) is
/// reached. Stops after [`MAX_REDIRECTS`] hops and returns the last one.
pub fn settle(full_path: &str, session: &SessionMarkers) -> Navigation {
    let mut current = full_path.to_string();
    for _ in 0..MAX_REDIRECTS {
        match navigate(&current, session) {
            Navigation::Redirected { to } => current = to,
            settled => return settled,
        }
    }
    navigate(&current, session)
}

/// Match a full path (query and fragment ignored) against the table.
/// Static segments compare ASCII case-insensitively.
pub fn find_route(full_path: &str) -> Option<RouteMatch> {
    let (path, _) = split_full_path(full_path);
    let path = normalize(path);
    ROUTES.iter().find_map(|route| {
        match_segments(route.path, path).map(|params| RouteMatch {
            route,
            full_path: full_path.to_string(),
            params,
        })
    })
}

/// Login URL that brings the user back to `full_path` afterwards.
pub fn login_redirect(full_path: &str) -> String {
    format!("{LOGIN_PATH}?{REDIRECT_PARAM}={}", encode_query_value(full_path))
}

/// Where to go after signing in from `login_full_path`. Only local
/// absolute paths are honoured; anything else goes home.
pub fn redirect_target(login_full_path: &str) -> String {
    match query_value(login_full_path, REDIRECT_PARAM) {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => target,
        _ => HOME_PATH.to_string(),
    }
}

fn split_full_path(full_path: &str) -> (&str, Option<&str>) {
    let without_fragment = full_path.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

fn match_segments(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let mut want = pattern.split('/').filter(|s| !s.is_empty());
    let mut have = path.split('/').filter(|s| !s.is_empty());
    let mut params = Vec::new();
    loop {
        match (want.next(), have.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(h)) => {
                if let Some(name) = w.strip_prefix(':') {
                    params.push((name, decode_query_value(h)));
                } else if !w.eq_ignore_ascii_case(h) {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn query_value(full_path: &str, key: &str) -> Option<String> {
    let (_, query) = split_full_path(full_path);
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode_query_value(v))
}

/// Percent-encode only what would break a query value, keeping paths
/// such as `/diet/list` readable.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'%' | b'&' | b'#' | b'+' | b' ' => out.push_str(&format!("%{byte:02X}")),
            0x00..=0x1F | 0x7F..=0xFF => out.push_str(&format!("%{byte:02X}")),
            _ => out.push(char::from(byte)),
        }
    }
    out
}

/// Inverse of [`encode_query_value`]; also accepts `+` for space.
/// Malformed escapes are kept verbatim.
pub fn decode_query_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                        continue;
                    }
                    _ => out.push(b'%'),
                }
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).and_then(|d| u8::try_from(d).ok())
}
