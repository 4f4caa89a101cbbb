use gleaner_http::HttpError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("request failed: {0}")]
    Http(#[from] HttpError),
    #[error("no profile data returned for '{0}'")]
    ProfileNotFound(String),
    #[error("invalid request parameter: {0}")]
    InvalidRequest(String),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("failed to write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SocialError {
    /// Whether the remote side refused the session (expired or missing cookie).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SocialError::Http(e) if e.status().is_some_and(|s| s.as_u16() == 401 || s.as_u16() == 403)
        )
    }
}
