//! HTTP client for the Video Game DB endpoints.

use crate::config::ApiConfig;
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

pub const AUTHENTICATE_PATH: &str = "/authenticate";
pub const VIDEOGAME_PATH: &str = "/videogame";

/// Path of a single game resource.
pub fn game_path(id: &str) -> String {
    format!("{}/{}", VIDEOGAME_PATH, id)
}

/// Status and raw body of a completed call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Top-level field of a JSON object body, if the body is one.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.json().ok()?.get(name).cloned()
    }
}

/// Unauthenticated client. Every request sends JSON `Accept` and `Content-Type` headers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self { http, config: config.clone() })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    pub async fn list_games(&self) -> Result<ApiResponse> {
        self.send(self.http.get(self.url(VIDEOGAME_PATH))).await
    }

    pub async fn get_game(&self, id: &str) -> Result<ApiResponse> {
        self.send(self.http.get(self.url(&game_path(id)))).await
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = ApiResponse::read(request.send().await?).await?;
        log::debug!("<- HTTP {} ({} bytes)", response.status, response.body.len());
        Ok(response)
    }
}

/// Client carrying `Authorization: Bearer <token>` on every call.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    api: ApiClient,
    token: String,
}

impl AuthenticatedClient {
    pub fn new(api: ApiClient, token: String) -> Self {
        Self { api, token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Bearer {}", self.token))
    }

    pub async fn list_games(&self) -> Result<ApiResponse> {
        let request = self.api.http.get(self.api.url(VIDEOGAME_PATH));
        self.api.send(self.authorized(request)).await
    }

    pub async fn get_game(&self, id: &str) -> Result<ApiResponse> {
        let request = self.api.http.get(self.api.url(&game_path(id)));
        self.api.send(self.authorized(request)).await
    }

    pub async fn create_game(&self, body: String) -> Result<ApiResponse> {
        let request = self.api.http.post(self.api.url(VIDEOGAME_PATH)).body(body);
        self.api.send(self.authorized(request)).await
    }

    pub async fn update_game(&self, id: &str, body: String) -> Result<ApiResponse> {
        let request = self.api.http.put(self.api.url(&game_path(id))).body(body);
        self.api.send(self.authorized(request)).await
    }

    pub async fn delete_game(&self, id: &str) -> Result<ApiResponse> {
        let request = self.api.http.delete(self.api.url(&game_path(id)));
        self.api.send(self.authorized(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_path() {
        assert_eq!(game_path("42"), "/videogame/42");
    }

    #[test]
    fn test_field_reads_top_level_value() {
        let response = ApiResponse { status: 200, body: r#"{"id": 5, "name": "Pong"}"#.to_string() };
        assert_eq!(response.field("name"), Some(Value::from("Pong")));
        assert_eq!(response.field("rating"), None);
    }

    #[test]
    fn test_field_on_plain_text_body() {
        let response = ApiResponse { status: 200, body: "Video game deleted".to_string() };
        assert!(response.json().is_err());
        assert_eq!(response.field("name"), None);
    }
}
