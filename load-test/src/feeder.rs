use rand::Rng;
use std::sync::Arc;
use videogamedb_core::FixtureStore;

use crate::session::UserSession;

/// Hands each user one fixture record, chosen at random with replacement.
#[derive(Debug, Clone)]
pub struct RandomFeeder {
    fixtures: Arc<FixtureStore>,
}

impl RandomFeeder {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }

    pub fn feed(&self, session: &UserSession) -> UserSession {
        self.feed_with(session, &mut rand::thread_rng())
    }

    pub fn feed_with<R: Rng + ?Sized>(&self, session: &UserSession, rng: &mut R) -> UserSession {
        let record = self.fixtures.random_game(rng);
        log::debug!("User {} fed game {} '{}'", session.user_id(), record.id, record.name);
        session.with_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use videogamedb_core::config::FixturesConfig;

    fn fixtures() -> Arc<FixtureStore> {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/..");
        Arc::new(
            FixtureStore::load(&FixturesConfig {
                game_data_path: format!("{}/resources/data/gameJsonFile.json", root),
                new_game_template_path: format!("{}/resources/bodies/newGameTemplate.json", root),
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_feed_sets_every_template_variable() {
        let feeder = RandomFeeder::new(fixtures());
        let session = feeder.feed(&UserSession::new(0));
        for key in ["id", "name", "releaseDate", "reviewScore", "category", "rating"] {
            assert!(session.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_fed_record_comes_from_fixtures() {
        let store = fixtures();
        let feeder = RandomFeeder::new(Arc::clone(&store));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let session = feeder.feed_with(&UserSession::new(0), &mut rng);
            let id: i64 = session.get("id").unwrap().parse().unwrap();
            let record = store.games().iter().find(|g| g.id == id).unwrap();
            assert_eq!(session.get("name"), Some(record.name.as_str()));
        }
    }
}
