//! Wire shapes of the profile and followers endpoints.
//!
//! Only the fields the collector reads are modelled; everything is optional
//! because the API omits or nulls fields freely.
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub data: Option<ProfileData>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileData {
    #[serde(default)]
    pub user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiUser {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub edge_followed_by: Option<EdgeCount>,
    #[serde(default)]
    pub edge_follow: Option<EdgeCount>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct EdgeCount {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FollowersResponse {
    #[serde(default)]
    pub users: Vec<FollowerUser>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub next_max_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FollowerUser {
    #[serde(default)]
    pub username: Option<String>,
}

impl FollowersResponse {
    /// Cursor for the next page; an empty string means there is none.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_max_id.as_deref().filter(|c| !c.is_empty())
    }
}

/// Ids and cursors show up both as JSON strings and as bare numbers.
fn opt_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(d)? {
        None => None,
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Float(f)) => Some(f.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cursor_accepts_string_number_and_null() {
        let page: FollowersResponse =
            serde_json::from_value(json!({"users": [], "next_max_id": "QVFE"})).unwrap();
        assert_eq!(page.next_cursor(), Some("QVFE"));

        let page: FollowersResponse =
            serde_json::from_value(json!({"users": [], "next_max_id": 100})).unwrap();
        assert_eq!(page.next_cursor(), Some("100"));

        let page: FollowersResponse =
            serde_json::from_value(json!({"users": [], "next_max_id": null})).unwrap();
        assert_eq!(page.next_cursor(), None);

        let page: FollowersResponse =
            serde_json::from_value(json!({"users": [], "next_max_id": ""})).unwrap();
        assert_eq!(page.next_cursor(), None);

        let page: FollowersResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn missing_user_is_none() {
        let env: ProfileEnvelope = serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(env.data.unwrap().user.is_none());

        let env: ProfileEnvelope = serde_json::from_value(json!({"status": "fail"})).unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn numeric_ids_become_strings() {
        let user: ApiUser = serde_json::from_value(json!({
            "id": 25025320,
            "username": "someone",
            "biography": null,
            "edge_followed_by": {"count": 12},
        }))
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("25025320"));
        assert!(user.biography.is_none());
        assert_eq!(user.edge_followed_by.unwrap().count, 12);
        assert!(user.edge_follow.is_none());
    }
}
