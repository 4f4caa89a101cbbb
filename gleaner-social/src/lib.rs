//! Follower collection for a social account.
//!
//! The flow is: [`resolve_target`] the account, page through its followers
//! with [`collect_followers`], look every follower up with the [`enrich`]
//! worker pool (which also tags them via [`classify`]), then
//! [`write_profiles_csv`].
//!
//! Everything that talks to the network goes through [`FollowerSource`];
//! [`InstagramApi`] is the HTTP implementation.
pub mod classify;
pub mod enrich;
pub mod error;
pub mod export;
pub mod harvest;
pub mod instagram;
pub mod profile;
pub mod source;

pub use classify::{COMMERCIAL_KEYWORDS, Tag, classify, join_tags};
pub use enrich::{chunk, enrich};
pub use error::SocialError;
pub use export::{COLUMNS, ProfileRow, default_output_path, write_profiles_csv};
pub use harvest::{Harvest, StopReason, collect_followers, resolve_target};
pub use instagram::InstagramApi;
pub use profile::{NO_CATEGORY, Profile};
pub use source::{FollowerPage, FollowerSource};
