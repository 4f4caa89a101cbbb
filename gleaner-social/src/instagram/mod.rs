//! Instagram web API: profile lookup and the followers listing.
//!
//! Both endpoints are the ones the web app calls with a logged-in session;
//! requests carry the `sessionid` cookie, the web app id header and a
//! browser user agent picked from a pool.
pub mod client;
pub mod types;

pub use client::{DEFAULT_APP_ID, DEFAULT_BASE_URL, InstagramApi};
