use crate::classify::{Tag, classify};
use crate::instagram::types::ApiUser;
use serde::Serialize;

/// Category shown when the account has none.
pub const NO_CATEGORY: &str = "N/A";

/// One enriched account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub full_name: String,
    /// Single line: newlines are folded to spaces.
    pub biography: String,
    pub external_url: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub is_private: bool,
    pub is_verified: bool,
    pub category: String,
    pub tags: Vec<Tag>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::new(),
            full_name: String::new(),
            biography: String::new(),
            external_url: None,
            follower_count: 0,
            following_count: 0,
            is_private: false,
            is_verified: false,
            category: NO_CATEGORY.to_string(),
            tags: Vec::new(),
        }
    }
}

impl Profile {
    /// Flatten an API user. `requested` fills in the username when the
    /// payload leaves it out. Tags are left empty; see [`Profile::classified`].
    pub fn from_api(user: ApiUser, requested: &str) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user
                .username
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| requested.to_string()),
            full_name: user.full_name.unwrap_or_default(),
            biography: fold_lines(user.biography.as_deref().unwrap_or_default()),
            external_url: user.external_url.filter(|u| !u.trim().is_empty()),
            follower_count: user.edge_followed_by.map(|e| e.count).unwrap_or(0),
            following_count: user.edge_follow.map(|e| e.count).unwrap_or(0),
            is_private: user.is_private.unwrap_or(false),
            is_verified: user.is_verified.unwrap_or(false),
            category: user
                .category_name
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| NO_CATEGORY.to_string()),
            tags: Vec::new(),
        }
    }

    /// The same profile with its classification tags computed.
    pub fn classified(mut self) -> Self {
        self.tags = classify(&self);
        self
    }
}

fn fold_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
