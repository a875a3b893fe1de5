use anyhow::Result;
use cucumber::{given, then, when};
use cucumber_tests::features::scenario::{self, ManageAction, ManagedOutcome};
use cucumber_tests::features::VideoGameWorld;

// ==================== BACKGROUND ====================

#[given(expr = "I am authenticated against the video game API")]
async fn given_authenticated(world: &mut VideoGameWorld) -> Result<()> {
    let suite = world.suite()?;
    anyhow::ensure!(!suite.client.token().is_empty(), "Authentication token is empty");
    Ok(())
}

// ==================== CREATE / DELETE ====================

#[when(expr = "I {word} a video game with name {string} and id {string}")]
async fn when_manage_game(world: &mut VideoGameWorld, action: String, name: String, id: String) -> Result<()> {
    let action: ManageAction = action.parse()?;
    let suite = world.suite()?;
    scenario::manage(&suite, &mut world.scenario, action, &name, &id).await
}

#[then(expr = "the video game should be {word} successfully")]
async fn then_game_managed(world: &mut VideoGameWorld, outcome: String) -> Result<()> {
    let outcome: ManagedOutcome = outcome.parse()?;
    scenario::assert_managed(&world.scenario, outcome)
}

// ==================== LIST ====================

#[when(expr = "I request all video games")]
async fn when_list_games(world: &mut VideoGameWorld) -> Result<()> {
    let suite = world.suite()?;
    scenario::list_all(&suite, &mut world.scenario).await
}

#[then(expr = "I should receive a list of video games")]
async fn then_games_listed(world: &mut VideoGameWorld) -> Result<()> {
    scenario::assert_listed(&world.scenario)
}

// ==================== FETCH ====================

#[when(expr = "I request a video game with ID {string}")]
async fn when_fetch_game(world: &mut VideoGameWorld, id: String) -> Result<()> {
    let suite = world.suite()?;
    scenario::fetch_by_id(&suite, &mut world.scenario, &id).await
}

#[then(expr = "I should receive the video game details with ID {string}")]
async fn then_game_fetched(world: &mut VideoGameWorld, id: String) -> Result<()> {
    scenario::assert_fetched(&world.scenario, &id)
}

// ==================== UPDATE ====================

#[when(expr = "I update a video game with ID {string} and new name {string}")]
async fn when_update_game(world: &mut VideoGameWorld, id: String, new_name: String) -> Result<()> {
    let suite = world.suite()?;
    scenario::update(&suite, &mut world.scenario, &id, &new_name).await
}

#[then(expr = "the video game details should reflect the updates with name {string}")]
async fn then_game_updated(world: &mut VideoGameWorld, expected_name: String) -> Result<()> {
    scenario::assert_updated(&world.scenario, &expected_name)
}
