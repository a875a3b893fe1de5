//! Request chain definitions.
//!
//! A scenario is data: each action is either a pause, a feed of one fixture
//! record, or a request whose name, path, body and bearer header may reference
//! session variables as `#{var}`.

use crate::check::Check;
use reqwest::Method;
use std::time::Duration;
use videogamedb_core::auth::Credentials;
use videogamedb_core::client::{game_path, AUTHENTICATE_PATH, VIDEOGAME_PATH};
use videogamedb_core::DELETE_CONFIRMATION;

/// Session variable holding the captured login token.
pub const TOKEN_VAR: &str = "jwtToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Sent as-is.
    Literal(String),
    /// Rendered against the session first.
    Template(String),
}

#[derive(Debug, Clone)]
pub struct RequestStep {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: Option<Body>,
    /// Send `Authorization: Bearer #{jwtToken}`.
    pub authorized: bool,
    pub checks: Vec<Check>,
}

impl RequestStep {
    fn new(name: &str, method: Method, path: impl Into<String>) -> Self {
        Self { name: name.to_string(), method, path: path.into(), body: None, authorized: false, checks: Vec::new() }
    }

    fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Request(RequestStep),
    Pause(Duration),
    Feed,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub actions: Vec<Action>,
}

impl Scenario {
    /// List, log in, then create, fetch and delete one fed game.
    pub fn video_game_chain(credentials: &Credentials, new_game_template: &str, pause: Duration) -> Self {
        let by_id = game_path("#{id}");
        let actions = vec![
            Action::Request(RequestStep::new("Get all video games", Method::GET, VIDEOGAME_PATH)),
            Action::Pause(pause),
            Action::Request(
                RequestStep::new("Authenticate", Method::POST, AUTHENTICATE_PATH)
                    .body(Body::Literal(credentials.to_body()))
                    .check(Check::save("token", TOKEN_VAR)),
            ),
            Action::Pause(pause),
            Action::Feed,
            Action::Request(
                RequestStep::new("Create New Game - #{name}", Method::POST, VIDEOGAME_PATH)
                    .body(Body::Template(new_game_template.to_string()))
                    .authorized(),
            ),
            Action::Pause(pause),
            Action::Request(
                RequestStep::new("Get Last Posted Game - #{name}", Method::GET, by_id.clone())
                    .check(Check::field_equals("name", "#{name}")),
            ),
            Action::Pause(pause),
            Action::Request(
                RequestStep::new("Delete Game - #{name}", Method::DELETE, by_id)
                    .authorized()
                    .check(Check::body_equals(DELETE_CONFIRMATION)),
            ),
        ];

        Self { name: "Video Game DB - Load Test".to_string(), actions }
    }

    pub fn requests(&self) -> impl Iterator<Item = &RequestStep> {
        self.actions.iter().filter_map(|action| match action {
            Action::Request(step) => Some(step),
            _ => None,
        })
    }
}
