// UI layer: an interactive terminal menu built on `dialoguer`.
//
// The UI keeps a "location" (a path such as `/diet/detail/3`) and, on
// every step, asks the router what to show for it. The router applies the
// navigation guard, so signing in, signing out and landing on protected
// pages all go through the same decision. Each page runs its own small
// flow and returns where to go next.

use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{user, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::router::{self, Navigation, RouteMatch, RouteName, HOME_PATH, LOGIN_PATH, REDIRECT_PARAM};
use crate::session::{SessionMarkers, SessionStore};

mod chat;
mod diet;
mod food;
mod report;
mod weight;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

/// What a page wants to happen after it ran.
pub(crate) enum Next {
    Go(String),
    Exit,
}

/// Everything a page needs: the API client, the session store and the
/// markers currently in effect.
pub(crate) struct App {
    pub(crate) api: ApiClient,
    store: SessionStore,
    markers: SessionMarkers,
}

impl App {
    fn new(mut api: ApiClient, store: SessionStore) -> Result<Self> {
        let markers = store.load()?;
        match markers.token.as_deref() {
            Some(token) if markers.is_authenticated() => api.set_token(token),
            _ => api.clear_token(),
        }
        debug!(signed_in = api.has_token(), dir = %store.dir().display(), "session loaded");
        Ok(App { api, store, markers })
    }

    /// Execute a request and unwrap the envelope's payload, showing a
    /// spinner while waiting.
    pub(crate) fn fetch<T: DeserializeOwned>(&self, msg: &'static str, req: ApiRequest<T>) -> Result<T, ClientError> {
        let pb = spinner(msg);
        let res = self.api.send(req);
        pb.finish_and_clear();
        res?.into_data()
    }

    /// Like [`App::fetch`] for endpoints whose payload may be absent.
    pub(crate) fn run<T: DeserializeOwned>(&self, msg: &'static str, req: ApiRequest<T>) -> Result<Option<T>, ClientError> {
        let pb = spinner(msg);
        let res = self.api.send(req);
        pb.finish_and_clear();
        res?.into_result()
    }

    pub(crate) fn user_id(&self) -> Option<i64> {
        let info: serde_json::Value = serde_json::from_str(self.markers.user_info.as_deref()?).ok()?;
        ["userId", "id"].iter().find_map(|k| info.get(*k).and_then(serde_json::Value::as_i64))
    }

    fn sign_in(&mut self, markers: SessionMarkers) -> Result<()> {
        self.store.save(&markers)?;
        if let Some(token) = markers.token.as_deref() {
            self.api.set_token(token);
        }
        self.markers = markers;
        Ok(())
    }

    fn sign_out(&mut self) -> Result<()> {
        self.store.clear()?;
        self.api.clear_token();
        self.markers = SessionMarkers::default();
        info!("signed out");
        Ok(())
    }
}

/// Main interactive loop. Starts at `start` and runs until a page asks to
/// exit.
pub fn main_menu(api: ApiClient, store: SessionStore, start: &str) -> Result<()> {
    let mut app = App::new(api, store)?;
    let mut location = start.to_string();

    loop {
        let route = match router::settle(&location, &app.markers) {
            Navigation::Allowed { route, title } => {
                println!("\n{}", title.bold().green());
                route
            }
            Navigation::Redirected { to } => {
                warn!(from = %location, %to, "too many redirects");
                anyhow::bail!("navigation to {location} did not settle");
            }
            Navigation::NotFound { path } => {
                println!("Page not found: {path}");
                location = HOME_PATH.to_string();
                continue;
            }
        };

        match show_page(&mut app, &route) {
            Ok(Next::Go(next)) => location = next,
            Ok(Next::Exit) => break,
            Err(e) => location = recover(&mut app, &route, e)?,
        }
    }
    Ok(())
}

/// Where to go after a page failed. An expired session signs out and
/// returns to login with the page carried in `?redirect=`; request and
/// input failures fall back to a parent page. Anything else is fatal.
fn recover(app: &mut App, route: &RouteMatch, err: anyhow::Error) -> Result<String> {
    let err = match err.downcast::<ClientError>() {
        Ok(ClientError::Status { status, .. }) if status == StatusCode::UNAUTHORIZED => {
            println!("Your session has expired, please sign in again.");
            app.sign_out()?;
            return Ok(router::login_redirect(&route.full_path));
        }
        Ok(client_err) => {
            println!("{}", format!("Request failed: {client_err}").red());
            return Ok(back_from(route));
        }
        Err(err) => err,
    };
    match err.downcast::<InvalidId>() {
        Ok(invalid) => {
            println!("{}", invalid.to_string().red());
            Ok(back_from(route))
        }
        Err(other) => Err(other),
    }
}

fn show_page(app: &mut App, route: &RouteMatch) -> Result<Next> {
    match route.route.name {
        RouteName::Login => login_page(app, route),
        RouteName::Register => register_page(),
        RouteName::Home => home_page(app),
        RouteName::Chat => chat::chat_page(app),
        RouteName::DietList => diet::list_page(app),
        RouteName::DietAdd => diet::edit_page(app, None),
        RouteName::DietEdit => diet::edit_page(app, Some(id_param(route)?)),
        RouteName::DietDetail => diet::detail_page(app, id_param(route)?),
        RouteName::WeightList => weight::list_page(app),
        RouteName::ReportList => report::list_page(app),
        RouteName::ReportDetail => report::detail_page(app, id_param(route)?),
        RouteName::AssessmentList => weight::assessment_page(app),
        RouteName::GoalSettings => weight::goal_page(app),
        RouteName::FoodAnalysis => food::analysis_page(app),
        RouteName::Knowledge => chat::knowledge_page(app),
        RouteName::User => user_page(app),
    }
}

/// Where to fall back to when a page's request fails.
fn back_from(route: &RouteMatch) -> String {
    match route.route.name {
        RouteName::DietAdd | RouteName::DietEdit | RouteName::DietDetail => "/diet/list".into(),
        RouteName::ReportDetail => "/report/list".into(),
        _ => HOME_PATH.into(),
    }
}

/// A `:id` segment that is not a number.
#[derive(Debug, thiserror::Error)]
#[error("invalid id `{raw}` in {path}")]
pub(crate) struct InvalidId {
    raw: String,
    path: String,
}

fn id_param(route: &RouteMatch) -> Result<i64, InvalidId> {
    let raw = route.param("id").unwrap_or_default();
    raw.parse().map_err(|_| InvalidId {
        raw: raw.to_string(),
        path: route.full_path.clone(),
    })
}

fn login_page(app: &mut App, route: &RouteMatch) -> Result<Next> {
    if route.query(REDIRECT_PARAM).is_some() {
        println!("Please sign in first.");
    }
    let items = ["Sign in", "Create account", "Exit"];
    match Select::new().items(&items).default(0).interact()? {
        0 => {}
        1 => return Ok(Next::Go(router::REGISTER_PATH.into())),
        _ => return Ok(Next::Exit),
    }

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    // `Password` hides input in terminal for passwords.
    let password: String = Password::new().with_prompt("Password").interact()?;

    let result = match app.fetch("Signing in...", user::login(&username, &password)?) {
        Ok(result) => result,
        Err(e) => {
            println!("Sign in failed: {e}");
            return Ok(Next::Go(route.full_path.clone()));
        }
    };
    println!("Welcome {}!", result.display_name().unwrap_or(&username));
    app.sign_in(result.to_markers()?)?;
    Ok(Next::Go(router::redirect_target(&route.full_path)))
}

fn register_page() -> Result<Next> {
    println!("Accounts are created by the service administrator.");
    println!("Once you have credentials, sign in from the login page.");
    pause()?;
    Ok(Next::Go(LOGIN_PATH.into()))
}

/// Destinations offered from the home page.
const HOME_MENU: [(&str, &str); 11] = [
    ("AI chat", "/chat"),
    ("Diet diary", "/diet/list"),
    ("Add a meal", "/diet/add"),
    ("Weight tracking", "/weight/list"),
    ("Nutrition reports", "/report/list"),
    ("Recognise food from a photo", "/food/analysis"),
    ("Health assessment", "/assessment/list"),
    ("Goal settings", "/user/goal-settings"),
    ("Nutrition knowledge", "/knowledge"),
    ("My profile", "/user"),
    ("Exit", ""),
];

fn home_page(app: &mut App) -> Result<Next> {
    let today = app.fetch("Loading today...", crate::api::diet::today_statistics());
    match today {
        Ok(stats) => println!(
            "Today: {} kcal over {} meal(s)",
            fmt_num(stats.total_calories),
            stats.meal_count.unwrap_or(0)
        ),
        Err(e) => println!("Today's summary unavailable: {e}"),
    }
    if let Ok(Some(latest)) = app.run("Loading weight...", crate::api::weight::latest()) {
        println!(
            "Latest weight: {} kg (BMI {})",
            fmt_num(latest.weight),
            fmt_num(latest.bmi)
        );
    }

    let labels: Vec<&str> = HOME_MENU.iter().map(|(label, _)| *label).collect();
    let choice = Select::new().items(&labels).default(0).interact()?;
    match HOME_MENU[choice].1 {
        "" => Ok(Next::Exit),
        path => Ok(Next::Go(path.to_string())),
    }
}

fn user_page(app: &mut App) -> Result<Next> {
    if let Some(info) = app.markers.user_info.as_deref() {
        match serde_json::from_str::<serde_json::Value>(info) {
            Ok(serde_json::Value::Object(map)) => {
                for (key, value) in map {
                    println!("  {key}: {value}");
                }
            }
            _ => println!("  {info}"),
        }
    }
    let items = ["Check AI service", "Sign out", "Back"];
    match Select::new().items(&items).default(2).interact()? {
        0 => {
            let status = app.run("Checking...", crate::api::ai::health())?;
            println!("AI service: {}", status.map_or_else(|| "ok".to_string(), |v| v.to_string()));
            Ok(Next::Go("/user".into()))
        }
        1 => {
            app.sign_out()?;
            Ok(Next::Go(LOGIN_PATH.into()))
        }
        _ => Ok(Next::Go(HOME_PATH.into())),
    }
}

/// Spinner shown while a request is in flight.
pub(crate) fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prompt for a `YYYY-MM-DD` date, re-asking until it parses.
pub(crate) fn prompt_date(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .validate_with(|s: &String| -> Result<(), &str> {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "expected YYYY-MM-DD")
        })
        .interact_text()?;
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}

/// Prompt for an optional number; empty input means "not given".
pub(crate) fn prompt_optional_f64(prompt: &str) -> Result<Option<f64>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), &str> {
            if s.trim().is_empty() || s.trim().parse::<f64>().is_ok() {
                Ok(())
            } else {
                Err("expected a number")
            }
        })
        .interact_text()?;
    let raw = raw.trim();
    Ok(if raw.is_empty() { None } else { Some(raw.parse()?) })
}

pub(crate) fn prompt_optional_text(prompt: &str) -> Result<Option<String>> {
    let raw: String = Input::new().with_prompt(prompt).allow_empty(true).interact_text()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| raw.to_string()))
}

pub(crate) fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

pub(crate) fn fmt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}
