//! Login flow producing an [`AuthenticatedClient`].

use crate::client::{ApiClient, ApiResponse, AuthenticatedClient, AUTHENTICATE_PATH};
use crate::config::ApiConfig;
use crate::error::{HarnessError, Result};
use serde::Serialize;

/// JSON login body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub password: String,
    pub username: String,
}

impl Credentials {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self { password: config.password.clone(), username: config.username.clone() }
    }

    pub fn to_body(&self) -> String {
        serde_json::json!({ "password": self.password, "username": self.username }).to_string()
    }
}

/// The non-empty `token` string of a login response body.
pub fn extract_token(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| HarnessError::MissingToken)?;
    match value.get("token").and_then(|t| t.as_str()) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(HarnessError::MissingToken),
    }
}

/// Log in with the configured credentials.
pub async fn authenticate(config: &ApiConfig) -> Result<AuthenticatedClient> {
    authenticate_with(ApiClient::new(config)?).await
}

/// Log in reusing an existing client.
pub async fn authenticate_with(api: ApiClient) -> Result<AuthenticatedClient> {
    let credentials = Credentials::from_config(api.config());
    let request = api.http().post(api.url(AUTHENTICATE_PATH)).body(credentials.to_body());
    let response: ApiResponse = api.send(request).await?;

    if response.status != 200 {
        log::error!("Authentication as '{}' rejected: HTTP {}", credentials.username, response.status);
        return Err(HarnessError::AuthenticationRejected {
            status: response.status,
            body: response.body,
        });
    }

    let token = extract_token(&response.body)?;
    log::info!("Authenticated as '{}' against {}", credentials.username, api.config().base_url);
    Ok(AuthenticatedClient::new(api, token))
}
