//! In-process Video Game DB.
//!
//! A stateful [`wiremock`] responder implementing the REST contract under
//! `/api`, so the functional suite and the load simulation can run without
//! network access:
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `POST /api/authenticate` | `{"token": FAKE_TOKEN}` for the configured credentials, 403 otherwise |
//! | `GET /api/videogame` | every stored game, ordered by id |
//! | `GET /api/videogame/{id}` | the game or 404 |
//! | `POST /api/videogame` | stores the body, echoes it (bearer required) |
//! | `PUT /api/videogame/{id}` | replaces the game, echoes it (bearer required) |
//! | `DELETE /api/videogame/{id}` | `Video game deleted` or 404 (bearer required) |

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use videogamedb_core::config::ApiConfig;
use videogamedb_core::{GameRecord, DELETE_CONFIRMATION};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Token handed out by `/authenticate`.
pub const FAKE_TOKEN: &str = "fake.jwt.token";

const BASE_PATH: &str = "/api";
const SEED: &str = include_str!("../../resources/data/gameJsonFile.json");

#[derive(Debug)]
struct FakeState {
    username: String,
    password: String,
    games: BTreeMap<i64, GameRecord>,
}

/// Handle on a running fake. The server stops when this is dropped.
pub struct FakeVideoGameDb {
    server: MockServer,
    state: Arc<Mutex<FakeState>>,
}

impl FakeVideoGameDb {
    /// Start with the repository's sample games and `admin`/`admin`.
    pub async fn start() -> Self {
        let games: Vec<GameRecord> = serde_json::from_str(SEED).unwrap_or_default();
        Self::start_with(games, "admin", "admin").await
    }

    pub async fn start_with(games: Vec<GameRecord>, username: &str, password: &str) -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            username: username.to_string(),
            password: password.to_string(),
            games: games.into_iter().map(|g| (g.id, g)).collect(),
        }));

        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(FakeResponder { state: Arc::clone(&state) })
            .mount(&server)
            .await;

        log::debug!("Fake Video Game DB listening on {}", server.uri());
        Self { server, state }
    }

    /// Base URL including the `/api` prefix.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), BASE_PATH)
    }

    /// Default API configuration pointed at this fake.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig { base_url: self.base_url(), ..ApiConfig::default() }
    }

    pub fn game(&self, id: i64) -> Option<GameRecord> {
        lock(&self.state).games.get(&id).cloned()
    }

    pub fn games(&self) -> Vec<GameRecord> {
        lock(&self.state).games.values().cloned().collect()
    }

    /// Every request received so far, as `"METHOD /path"`.
    pub async fn requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }
}

fn lock(state: &Mutex<FakeState>) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct FakeResponder {
    state: Arc<Mutex<FakeState>>,
}

impl FakeResponder {
    fn authorized(request: &Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", FAKE_TOKEN))
            .unwrap_or(false)
    }

    fn login(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&request.body) else {
            return ResponseTemplate::new(400);
        };
        let state = lock(&self.state);
        let valid = body.get("username").and_then(|v| v.as_str()) == Some(state.username.as_str())
            && body.get("password").and_then(|v| v.as_str()) == Some(state.password.as_str());
        if valid {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": FAKE_TOKEN }))
        } else {
            ResponseTemplate::new(403)
        }
    }

    fn store(&self, request: &Request, path_id: Option<i64>) -> ResponseTemplate {
        let Ok(mut game) = serde_json::from_slice::<GameRecord>(&request.body) else {
            return ResponseTemplate::new(400);
        };
        if let Some(id) = path_id {
            game.id = id;
        }
        lock(&self.state).games.insert(game.id, game.clone());
        ResponseTemplate::new(200).set_body_json(&game)
    }
}

impl Respond for FakeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Some(path) = request.url.path().strip_prefix(BASE_PATH) else {
            return ResponseTemplate::new(404);
        };
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let method = request.method.as_str();

        let write = matches!(method, "POST" | "PUT" | "DELETE") && segments[0] == "videogame";
        if write && !Self::authorized(request) {
            return ResponseTemplate::new(403);
        }

        match (method, segments.as_slice()) {
            ("POST", ["authenticate"]) => self.login(request),
            ("GET", ["videogame"]) => {
                let games: Vec<GameRecord> = lock(&self.state).games.values().cloned().collect();
                ResponseTemplate::new(200).set_body_json(&games)
            }
            ("POST", ["videogame"]) => self.store(request, None),
            (_, ["videogame", id]) => {
                let Ok(id) = id.parse::<i64>() else {
                    return ResponseTemplate::new(400);
                };
                match method {
                    "GET" => match lock(&self.state).games.get(&id) {
                        Some(game) => ResponseTemplate::new(200).set_body_json(game),
                        None => ResponseTemplate::new(404),
                    },
                    "PUT" => self.store(request, Some(id)),
                    "DELETE" => match lock(&self.state).games.remove(&id) {
                        Some(_) => ResponseTemplate::new(200).set_body_string(DELETE_CONFIRMATION),
                        None => ResponseTemplate::new(404),
                    },
                    _ => ResponseTemplate::new(405),
                }
            }
            _ => ResponseTemplate::new(404),
        }
    }
}
