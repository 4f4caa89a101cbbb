use crate::error::SocialError;
use crate::instagram::types::{FollowersResponse, ProfileEnvelope};
use crate::profile::Profile;
use crate::source::{FollowerPage, FollowerSource};
use async_trait::async_trait;
use gleaner_http::header::{ACCEPT, REFERER, USER_AGENT};
use gleaner_http::{
    Auth, HeaderMap, HeaderName, HeaderValue, HttpClient, RequestOpts, UserAgentPool,
};
use std::borrow::Cow;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";
pub const DEFAULT_APP_ID: &str = "936619743392459";

const PROFILE_PATH: &str = "api/v1/users/web_profile_info/";
const SESSION_COOKIE: &str = "sessionid";
const APP_ID_HEADER: &str = "x-ig-app-id";
const PROFILE_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct InstagramApi {
    http: HttpClient,
    session_id: String,
    app_id: String,
    page_size: u32,
    agents: UserAgentPool,
}

impl InstagramApi {
    /// Client for `base_url` authenticated by the `sessionid` cookie value.
    pub fn new(base_url: &str, session_id: impl Into<String>) -> Result<Self, SocialError> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            session_id: session_id.into(),
            app_id: DEFAULT_APP_ID.to_string(),
            page_size: 50,
            agents: UserAgentPool::default(),
        })
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn with_user_agents(mut self, agents: UserAgentPool) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }

    /// Browser-like headers; `referer_path` is relative to the base URL.
    fn headers(&self, referer_path: &str) -> Result<HeaderMap, SocialError> {
        let referer = self.http.base().join(referer_path)?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            HeaderName::from_static(APP_ID_HEADER),
            header_value(&self.app_id)?,
        );
        headers.insert(REFERER, header_value(referer.as_str())?);
        headers.insert(USER_AGENT, header_value(self.agents.pick())?);
        Ok(headers)
    }

    fn opts<'a>(
        &'a self,
        referer_path: &str,
        timeout: Duration,
    ) -> Result<RequestOpts<'a>, SocialError> {
        Ok(RequestOpts {
            timeout: Some(timeout),
            auth: Auth::Cookie {
                name: SESSION_COOKIE,
                value: &self.session_id,
            },
            headers: Some(self.headers(referer_path)?),
            ..Default::default()
        })
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, SocialError> {
    HeaderValue::from_str(raw).map_err(|e| SocialError::InvalidRequest(format!("{raw:?}: {e}")))
}

#[async_trait]
impl FollowerSource for InstagramApi {
    async fn profile(&self, username: &str) -> Result<Profile, SocialError> {
        let mut opts = self.opts(&format!("{username}/"), PROFILE_TIMEOUT)?;
        opts.query = Some(vec![("username", Cow::Borrowed(username))]);

        let envelope: ProfileEnvelope = self.http.get_json(PROFILE_PATH, opts).await?;
        let user = envelope
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| SocialError::ProfileNotFound(username.to_string()))?;
        let profile = Profile::from_api(user, username);
        tracing::debug!(
            target: "social.instagram",
            username = %profile.username,
            followers = profile.follower_count,
            following = profile.following_count,
            "profile fetched"
        );
        Ok(profile)
    }

    async fn followers_page(
        &self,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<FollowerPage, SocialError> {
        let path = format!("api/v1/friendships/{user_id}/followers/");
        let mut query: Vec<(&str, Cow<'_, str>)> = vec![
            ("count", Cow::Owned(self.page_size.to_string())),
            ("search_surface", Cow::Borrowed("follow_list_page")),
        ];
        if let Some(cursor) = cursor {
            query.push(("max_id", Cow::Borrowed(cursor)));
        }
        let mut opts = self.opts(&format!("{user_id}/followers/"), PAGE_TIMEOUT)?;
        opts.query = Some(query);

        let resp: FollowersResponse = self.http.get_json(&path, opts).await?;
        let next_cursor = resp.next_cursor().map(str::to_string);
        let usernames: Vec<String> = resp
            .users
            .into_iter()
            .filter_map(|u| u.username)
            .filter(|u| !u.is_empty())
            .collect();
        tracing::debug!(
            target: "social.instagram",
            user_id,
            page_len = usernames.len(),
            has_next = next_cursor.is_some(),
            "followers page fetched"
        );
        Ok(FollowerPage {
            usernames,
            next_cursor,
        })
    }
}
