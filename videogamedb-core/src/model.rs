use serde::{Deserialize, Serialize};

/// A video game record as exchanged with the API and stored in fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: i64,
    pub name: String,
    pub release_date: String,
    pub review_score: i64,
    pub category: String,
    pub rating: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_fields() {
        let json = r#"{
            "id": 3,
            "name": "Tetris",
            "releaseDate": "1984-06-25",
            "reviewScore": 88,
            "category": "Puzzle",
            "rating": "Universal"
        }"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.release_date, "1984-06-25");
        assert_eq!(game.review_score, 88);
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let game = GameRecord {
            id: 1,
            name: "Doom".to_string(),
            release_date: "1993-12-10".to_string(),
            review_score: 91,
            category: "Shooter".to_string(),
            rating: "Mature".to_string(),
        };
        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(value["releaseDate"], "1993-12-10");
        assert_eq!(value["reviewScore"], 91);
    }
}
