use crate::error::SocialError;
use crate::profile::Profile;
use async_trait::async_trait;

/// One page of a followers listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowerPage {
    pub usernames: Vec<String>,
    /// `None` once the listing is exhausted.
    pub next_cursor: Option<String>,
}

/// Where profiles and follower pages come from.
///
/// The collector and the enrichment pool only talk to this trait, so tests
/// and alternative backends can stand in for the HTTP client.
#[async_trait]
pub trait FollowerSource: Send + Sync {
    /// Profile details for `username`, untagged.
    async fn profile(&self, username: &str) -> Result<Profile, SocialError>;

    /// Followers of the account with id `user_id`, starting at `cursor`.
    async fn followers_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<FollowerPage, SocialError>;
}
