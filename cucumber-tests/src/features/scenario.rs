//! Scenario operations behind the step definitions.
//!
//! Each `When` operation stores its response in the [`ScenarioContext`]; the
//! paired `Then` check reads it back. Nothing here outlives a scenario.

use crate::features::suite::Suite;
use anyhow::{anyhow, bail, ensure, Context, Result};
use serde_json::Value;
use std::str::FromStr;
use videogamedb_core::body::{build_create_body, build_update_body};
use videogamedb_core::{ApiResponse, DELETE_CONFIRMATION};

/// Memory carried between the steps of one scenario.
#[derive(Debug, Default, Clone)]
pub struct ScenarioContext {
    pub last_response: Option<ApiResponse>,
    pub current_game_name: Option<String>,
}

impl ScenarioContext {
    pub fn response(&self) -> Result<&ApiResponse> {
        self.last_response.as_ref().ok_or_else(|| anyhow!("No request has been sent in this scenario"))
    }

    fn expect_status(&self, expected: u16) -> Result<&ApiResponse> {
        let response = self.response()?;
        ensure!(
            response.status == expected,
            "Expected status code <{}> but was <{}>: {}",
            expected,
            response.status,
            response.body
        );
        Ok(response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    Create,
    Delete,
}

impl FromStr for ManageAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            other => bail!("Unsupported action '{}': expected create or delete", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedOutcome {
    Created,
    Deleted,
}

impl FromStr for ManagedOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created" => Ok(Self::Created),
            "deleted" => Ok(Self::Deleted),
            other => bail!("Unsupported outcome '{}': expected created or deleted", other),
        }
    }
}

/// Create (from a random fixture record) or delete a game.
pub async fn manage(
    suite: &Suite,
    ctx: &mut ScenarioContext,
    action: ManageAction,
    name: &str,
    id: &str,
) -> Result<()> {
    ctx.current_game_name = Some(name.to_string());

    let response = match action {
        ManageAction::Create => {
            let source = suite.fixtures.random_game(&mut rand::thread_rng()).clone();
            log::debug!("Creating game {} '{}' from fixture '{}'", id, name, source.name);
            let body = build_create_body(suite.fixtures.new_game_template(), id, name, &source);
            suite.client.create_game(body).await?
        }
        ManageAction::Delete => suite.client.delete_game(id).await?,
    };

    ctx.last_response = Some(response);
    Ok(())
}

pub fn assert_managed(ctx: &ScenarioContext, outcome: ManagedOutcome) -> Result<()> {
    let response = ctx.expect_status(200)?;
    match outcome {
        ManagedOutcome::Created => {
            let expected = ctx
                .current_game_name
                .as_deref()
                .context("No game name was used in this scenario")?;
            expect_field(response, "name", &Value::from(expected))
        }
        ManagedOutcome::Deleted => {
            ensure!(
                response.body == DELETE_CONFIRMATION,
                "Expected body \"{}\" but was \"{}\"",
                DELETE_CONFIRMATION,
                response.body
            );
            Ok(())
        }
    }
}

pub async fn list_all(suite: &Suite, ctx: &mut ScenarioContext) -> Result<()> {
    ctx.last_response = Some(suite.client.list_games().await?);
    Ok(())
}

pub fn assert_listed(ctx: &ScenarioContext) -> Result<()> {
    let response = ctx.expect_status(200)?;
    let games = response.json().context("List response is not JSON")?;
    let games = games.as_array().context("List response is not an array")?;
    ensure!(!games.is_empty(), "Expected a non-empty list of video games");
    Ok(())
}

pub async fn fetch_by_id(suite: &Suite, ctx: &mut ScenarioContext, id: &str) -> Result<()> {
    ctx.last_response = Some(suite.client.get_game(id).await?);
    Ok(())
}

pub fn assert_fetched(ctx: &ScenarioContext, id: &str) -> Result<()> {
    let expected: i64 = id.trim().parse().with_context(|| format!("Invalid game id '{}'", id))?;
    let response = ctx.expect_status(200)?;
    expect_field(response, "id", &Value::from(expected))
}

pub async fn update(suite: &Suite, ctx: &mut ScenarioContext, id: &str, new_name: &str) -> Result<()> {
    let body = build_update_body(id, new_name)?;
    ctx.last_response = Some(suite.client.update_game(id, body).await?);
    Ok(())
}

pub fn assert_updated(ctx: &ScenarioContext, expected_name: &str) -> Result<()> {
    let response = ctx.expect_status(200)?;
    expect_field(response, "name", &Value::from(expected_name))
}

fn expect_field(response: &ApiResponse, field: &str, expected: &Value) -> Result<()> {
    let actual = response.field(field);
    ensure!(
        actual.as_ref() == Some(expected),
        "JSON path {} doesn't match: expected {} but was {}",
        field,
        expected,
        actual.map(|v| v.to_string()).unwrap_or_else(|| "<missing>".to_string())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(status: u16, body: &str, name: Option<&str>) -> ScenarioContext {
        ScenarioContext {
            last_response: Some(ApiResponse { status, body: body.to_string() }),
            current_game_name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_action_and_outcome() {
        assert_eq!("create".parse::<ManageAction>().unwrap(), ManageAction::Create);
        assert_eq!("delete".parse::<ManageAction>().unwrap(), ManageAction::Delete);
        assert!("archive".parse::<ManageAction>().is_err());
        assert_eq!("deleted".parse::<ManagedOutcome>().unwrap(), ManagedOutcome::Deleted);
        assert!("updated".parse::<ManagedOutcome>().is_err());
    }

    #[test]
    fn test_created_requires_matching_name() {
        let ok = ctx_with(200, r#"{"id": 9999, "name": "TestGame"}"#, Some("TestGame"));
        assert!(assert_managed(&ok, ManagedOutcome::Created).is_ok());

        let wrong = ctx_with(200, r#"{"id": 9999, "name": "Other"}"#, Some("TestGame"));
        let err = assert_managed(&wrong, ManagedOutcome::Created).unwrap_err();
        assert!(err.to_string().contains("JSON path name"));
    }

    #[test]
    fn test_deleted_requires_exact_body() {
        let ok = ctx_with(200, "Video game deleted", None);
        assert!(assert_managed(&ok, ManagedOutcome::Deleted).is_ok());

        let quoted = ctx_with(200, "\"Video game deleted\"", None);
        assert!(assert_managed(&quoted, ManagedOutcome::Deleted).is_err());
    }

    #[test]
    fn test_status_is_checked_first() {
        let forbidden = ctx_with(403, "", Some("TestGame"));
        let err = assert_managed(&forbidden, ManagedOutcome::Created).unwrap_err();
        assert!(err.to_string().contains("Expected status code <200> but was <403>"));
    }

    #[test]
    fn test_listed_requires_non_empty_array() {
        assert!(assert_listed(&ctx_with(200, r#"[{"id": 1}]"#, None)).is_ok());
        assert!(assert_listed(&ctx_with(200, "[]", None)).is_err());
        assert!(assert_listed(&ctx_with(200, r#"{"id": 1}"#, None)).is_err());
    }

    #[test]
    fn test_fetched_compares_integer_id() {
        let ctx = ctx_with(200, r#"{"id": 1, "name": "Resident Evil 4"}"#, None);
        assert!(assert_fetched(&ctx, "1").is_ok());
        assert!(assert_fetched(&ctx, "2").is_err());
        assert!(assert_fetched(&ctx, "one").is_err());
    }

    #[test]
    fn test_assertion_without_request_fails() {
        let err = assert_updated(&ScenarioContext::default(), "UpdatedName").unwrap_err();
        assert!(err.to_string().contains("No request"));
    }
}
