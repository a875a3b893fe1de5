//! Per-user session.
//!
//! A session is never mutated in place: every capture produces a new value, so
//! a step either hands back the updated session or leaves the old one intact.

use std::collections::HashMap;
use videogamedb_core::body::render_template;
use videogamedb_core::{GameRecord, Result};

#[derive(Debug, Clone, Default)]
pub struct UserSession {
    user_id: usize,
    vars: HashMap<String, String>,
    failed: bool,
}

impl UserSession {
    pub fn new(user_id: usize) -> Self {
        Self { user_id, ..Self::default() }
    }

    pub fn user_id(&self) -> usize {
        self.user_id
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn with_var(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.vars.insert(key.into(), value.into());
        next
    }

    /// Copy the six fixture attributes under their JSON names.
    pub fn with_record(&self, record: &GameRecord) -> Self {
        let mut next = self.clone();
        for (key, value) in [
            ("id", record.id.to_string()),
            ("name", record.name.clone()),
            ("releaseDate", record.release_date.clone()),
            ("reviewScore", record.review_score.to_string()),
            ("category", record.category.clone()),
            ("rating", record.rating.clone()),
        ] {
            next.vars.insert(key.to_string(), value);
        }
        next
    }

    pub fn mark_failed(&self) -> Self {
        Self { failed: true, ..self.clone() }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Resolve every `#{var}` in `text` from this session.
    pub fn render(&self, text: &str) -> Result<String> {
        render_template(text, |name| self.get(name).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videogamedb_core::HarnessError;

    fn tetris() -> GameRecord {
        GameRecord {
            id: 3,
            name: "Tetris".to_string(),
            release_date: "1984-06-06".to_string(),
            review_score: 88,
            category: "Puzzle".to_string(),
            rating: "Universal".to_string(),
        }
    }

    #[test]
    fn test_with_var_leaves_original_untouched() {
        let session = UserSession::new(0);
        let next = session.with_var("jwtToken", "abc");

        assert_eq!(session.get("jwtToken"), None);
        assert_eq!(next.get("jwtToken"), Some("abc"));
    }

    #[test]
    fn test_with_record_uses_json_names() {
        let session = UserSession::new(1).with_record(&tetris());
        assert_eq!(session.get("id"), Some("3"));
        assert_eq!(session.get("releaseDate"), Some("1984-06-06"));
        assert_eq!(session.get("reviewScore"), Some("88"));
        assert_eq!(session.user_id(), 1);
    }

    #[test]
    fn test_render_resolves_session_vars() {
        let session = UserSession::new(0).with_record(&tetris());
        assert_eq!(session.render("Delete Game - #{name}").unwrap(), "Delete Game - Tetris");
        assert_eq!(session.render("/videogame/#{id}").unwrap(), "/videogame/3");
    }

    #[test]
    fn test_render_missing_var_fails() {
        let err = UserSession::new(0).render("Bearer #{jwtToken}").unwrap_err();
        assert!(matches!(err, HarnessError::MissingVariable(ref name) if name == "jwtToken"));
    }

    #[test]
    fn test_mark_failed_is_sticky_across_captures() {
        let session = UserSession::new(0).mark_failed().with_var("a", "b");
        assert!(session.is_failed());
        assert!(!UserSession::new(0).is_failed());
    }
}
