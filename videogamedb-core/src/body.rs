//! Request body construction.
//!
//! Two flavours of templating live here:
//!
//! - [`build_create_body`] fills the six known placeholders of the new-game
//!   template and leaves anything else untouched.
//! - [`render_template`] resolves *every* `#{var}` through a lookup and fails
//!   on the first unknown name, which is what the load simulation needs for
//!   per-user interpolation.

use crate::error::{HarnessError, Result};
use crate::model::GameRecord;
use serde_json::json;

pub const UPDATE_RELEASE_DATE: &str = "2023-10-10";
pub const UPDATE_REVIEW_SCORE: i64 = 85;
pub const UPDATE_CATEGORY: &str = "Adventure";
pub const UPDATE_RATING: &str = "Mature";

/// Body for `POST /videogame`.
///
/// `id` and `name` come from the caller, the remaining fields are copied from
/// `source`. A placeholder absent from `template` is not reported; use
/// [`unresolved_placeholders`] on the result when strictness matters.
pub fn build_create_body(template: &str, id: &str, name: &str, source: &GameRecord) -> String {
    template
        .replace("#{id}", id)
        .replace("#{name}", name)
        .replace("#{releaseDate}", &source.release_date)
        .replace("#{reviewScore}", &source.review_score.to_string())
        .replace("#{category}", &source.category)
        .replace("#{rating}", &source.rating)
}

/// Body for `PUT /videogame/{id}` with fixed values for every field but the name.
pub fn build_update_body(id: &str, new_name: &str) -> Result<String> {
    let id: i64 = id.trim().parse().map_err(|_| HarnessError::InvalidGameId(id.to_string()))?;

    let body = json!({
        "id": id,
        "name": new_name,
        "releaseDate": UPDATE_RELEASE_DATE,
        "reviewScore": UPDATE_REVIEW_SCORE,
        "category": UPDATE_CATEGORY,
        "rating": UPDATE_RATING,
    });
    Ok(body.to_string())
}

/// Names of the `#{...}` placeholders still present in `text`, in order.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("#{") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Resolve every `#{var}` in `template` through `lookup`.
///
/// An unterminated `#{` is copied through literally.
pub fn render_template<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("#{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = &after[..end];
        let value = lookup(name).ok_or_else(|| HarnessError::MissingVariable(name.to_string()))?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TEMPLATE: &str = r##"{
  "id": #{id},
  "name": "#{name}",
  "releaseDate": "#{releaseDate}",
  "reviewScore": #{reviewScore},
  "category": "#{category}",
  "rating": "#{rating}"
}"##;

    fn zelda() -> GameRecord {
        GameRecord {
            id: 7,
            name: "The Legend of Zelda".to_string(),
            release_date: "1986-02-21".to_string(),
            review_score: 95,
            category: "Adventure".to_string(),
            rating: "Universal".to_string(),
        }
    }

    #[test]
    fn test_create_body_takes_id_and_name_from_caller() {
        let body = build_create_body(TEMPLATE, "9999", "TestGame", &zelda());
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["id"], 9999);
        assert_eq!(value["name"], "TestGame");
        assert_eq!(value["releaseDate"], "1986-02-21");
        assert_eq!(value["reviewScore"], 95);
        assert_eq!(value["category"], "Adventure");
        assert_eq!(value["rating"], "Universal");
        assert!(unresolved_placeholders(&body).is_empty());
    }

    #[test]
    fn test_create_body_leaves_unknown_placeholders() {
        let template = r##"{"name": "#{name}", "publisher": "#{publisher}"}"##;
        let body = build_create_body(template, "1", "Halo", &zelda());
        assert_eq!(body, r##"{"name": "Halo", "publisher": "#{publisher}"}"##);
        assert_eq!(unresolved_placeholders(&body), vec!["publisher".to_string()]);
    }

    #[test]
    fn test_update_body_uses_fixed_defaults() {
        for (id, name) in [("1", "UpdatedName"), ("42", "Other"), ("7", "")] {
            let body = build_update_body(id, name).unwrap();
            let value: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(value["id"], id.parse::<i64>().unwrap());
            assert_eq!(value["name"], name);
            assert_eq!(value["releaseDate"], "2023-10-10");
            assert_eq!(value["reviewScore"], 85);
            assert_eq!(value["category"], "Adventure");
            assert_eq!(value["rating"], "Mature");
        }
    }

    #[test]
    fn test_update_body_is_deterministic() {
        assert_eq!(
            build_update_body("1", "UpdatedName").unwrap(),
            build_update_body("1", "UpdatedName").unwrap()
        );
    }

    #[test]
    fn test_update_body_rejects_non_numeric_id() {
        let err = build_update_body("abc", "Name").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidGameId(ref id) if id == "abc"));
    }

    #[test]
    fn test_render_template_resolves_all_variables() {
        let vars: HashMap<&str, &str> = [("id", "12"), ("name", "Portal")].into();
        let out = render_template("/videogame/#{id} - #{name}", |k| {
            vars.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(out, "/videogame/12 - Portal");
    }

    #[test]
    fn test_render_template_fails_on_missing_variable() {
        let err = render_template("Bearer #{jwtToken}", |_| None).unwrap_err();
        assert!(matches!(err, HarnessError::MissingVariable(ref v) if v == "jwtToken"));
        assert_eq!(err.to_string(), "No attribute named 'jwtToken' is defined");
    }

    #[test]
    fn test_render_template_keeps_unterminated_marker() {
        let out = render_template("price #{", |_| None).unwrap();
        assert_eq!(out, "price #{");
    }
}
