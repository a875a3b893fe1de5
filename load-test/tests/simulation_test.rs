//! End-to-end load runs against the in-process Video Game DB, with no pauses.

use load_test::Simulation;
use videogamedb_core::config::{FixturesConfig, HarnessConfig, LoadConfig};
use videogamedb_fake::FakeVideoGameDb;

fn config_for(fake: &FakeVideoGameDb, users: u64) -> HarnessConfig {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/..");
    HarnessConfig {
        api: fake.api_config(),
        fixtures: FixturesConfig {
            game_data_path: format!("{}/resources/data/gameJsonFile.json", root),
            new_game_template_path: format!("{}/resources/bodies/newGameTemplate.json", root),
        },
        load: LoadConfig { users, ramp_duration: 0, start_delay: 0, pause: 0 },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_single_user_completes_chain() {
    let fake = FakeVideoGameDb::start().await;
    let report = Simulation::new(&config_for(&fake, 1)).unwrap().run().await.unwrap();

    assert!(!report.has_failures(), "unexpected KO: {:?}", report.requests);
    assert_eq!(report.total_ok(), 5);
    assert_eq!(report.request("Get all video games").map(|r| r.ok), Some(1));
    assert_eq!(report.request("Authenticate").map(|r| r.ok), Some(1));
    assert_eq!(report.requests_starting_with("Create New Game - ").count(), 1);
    assert_eq!(report.requests_starting_with("Get Last Posted Game - ").count(), 1);
    assert_eq!(report.requests_starting_with("Delete Game - ").count(), 1);

    let requests = fake.requests().await;
    let methods: Vec<&str> = requests.iter().map(|r| r.split(' ').next().unwrap_or_default()).collect();
    assert_eq!(methods, vec!["GET", "POST", "POST", "GET", "DELETE"]);
    assert_eq!(fake.games().len(), 9);
}

#[tokio::test]
async fn test_every_user_sends_five_requests() {
    let fake = FakeVideoGameDb::start().await;
    let report = Simulation::new(&config_for(&fake, 4)).unwrap().run().await.unwrap();

    // Users may draw the same record, so a fetch can race a delete
    let total: u64 = report.requests.iter().map(|r| r.total()).sum();
    assert_eq!(total, 20);
    assert_eq!(report.request("Authenticate").map(|r| r.ok), Some(4));
    assert_eq!(fake.requests().await.len(), 20);
}

#[tokio::test]
async fn test_rejected_login_turns_writes_ko_and_users_continue() {
    let fake = FakeVideoGameDb::start().await;
    let mut config = config_for(&fake, 1);
    config.api.password = "wrong".to_string();

    let report = Simulation::new(&config).unwrap().run().await.unwrap();

    assert!(report.has_failures());
    assert_eq!(report.request("Authenticate").map(|r| r.ko), Some(1));
    assert!(report.requests_starting_with("Create New Game - ").all(|r| r.ko == 1));
    assert!(report.requests_starting_with("Delete Game - ").all(|r| r.ko == 1));
    // The fetch needs no token and still runs
    assert!(report.requests_starting_with("Get Last Posted Game - ").all(|r| r.ok == 1));

    // Writes without a token are never sent
    let requests = fake.requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(fake.games().len(), 10);
}

#[test]
fn test_missing_fixtures_fail_before_any_user_starts() {
    let mut config = HarnessConfig::default();
    config.fixtures.game_data_path = "/nonexistent/games.json".to_string();

    let err = Simulation::new(&config).err().expect("set-up should fail");
    assert!(err.to_string().contains("Failed to load fixtures"));
}
