//! Cursor-driven walk over a followers listing.
use crate::error::SocialError;
use crate::profile::Profile;
use crate::source::FollowerSource;
use gleaner_common::Pacer;
use std::fmt;

/// Why a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The listing had no further cursor.
    Exhausted,
    /// The requested number of usernames was collected.
    LimitReached,
    /// A page request failed; the usernames gathered before it are kept.
    Failed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => f.write_str("listing exhausted"),
            StopReason::LimitReached => f.write_str("limit reached"),
            StopReason::Failed(msg) => write!(f, "page request failed: {msg}"),
        }
    }
}

/// Usernames in the order the listing returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    pub usernames: Vec<String>,
    pub pages: usize,
    pub stop: StopReason,
}

impl Harvest {
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, StopReason::Failed(_))
    }
}

/// Look up the account whose followers will be collected.
pub async fn resolve_target<S>(source: &S, username: &str) -> Result<Profile, SocialError>
where
    S: FollowerSource + ?Sized,
{
    let target = source.profile(username).await?;
    if target.id.is_empty() {
        return Err(SocialError::ProfileNotFound(username.to_string()));
    }
    tracing::info!(
        target: "social.harvest",
        username = %target.username,
        id = %target.id,
        followers = target.follower_count,
        "target resolved"
    );
    Ok(target)
}

/// Page through the followers of `target_id` until the cursor runs out,
/// `limit` usernames are collected, or a request fails.
///
/// `limit` of `None` or `Some(0)` means no limit. `pacer` is awaited between
/// pages, never before the first one.
pub async fn collect_followers<S>(
    source: &S,
    target_id: &str,
    limit: Option<usize>,
    pacer: &Pacer,
) -> Harvest
where
    S: FollowerSource + ?Sized,
{
    let limit = limit.filter(|&n| n > 0);
    let mut usernames = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    let stop = loop {
        let page = match source.followers_page(target_id, cursor.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    target: "social.harvest",
                    error = %e,
                    collected = usernames.len(),
                    "followers page failed, keeping partial list"
                );
                break StopReason::Failed(e.to_string());
            }
        };
        pages += 1;
        usernames.extend(page.usernames);
        tracing::info!(
            target: "social.harvest",
            page = pages,
            collected = usernames.len(),
            "followers page collected"
        );

        if let Some(limit) = limit {
            if usernames.len() >= limit {
                usernames.truncate(limit);
                break StopReason::LimitReached;
            }
        }

        match page.next_cursor {
            None => break StopReason::Exhausted,
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                tracing::warn!(target: "social.harvest", cursor = %next, "cursor did not advance");
                break StopReason::Exhausted;
            }
            Some(next) => cursor = Some(next),
        }
        pacer.pause().await;
    };

    tracing::info!(
        target: "social.harvest",
        total = usernames.len(),
        pages,
        stop = %stop,
        "followers collection finished"
    );
    Harvest {
        usernames,
        pages,
        stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FollowerPage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves canned pages keyed by cursor and records the cursors asked for.
    struct Pages {
        pages: Vec<(Option<&'static str>, Result<FollowerPage, ()>)>,
        seen: Mutex<Vec<Option<String>>>,
    }

    fn page(names: &[&str], next: Option<&str>) -> FollowerPage {
        FollowerPage {
            usernames: names.iter().map(|s| s.to_string()).collect(),
            next_cursor: next.map(str::to_string),
        }
    }

    #[async_trait]
    impl FollowerSource for Pages {
        async fn profile(&self, username: &str) -> Result<Profile, SocialError> {
            Ok(Profile {
                id: "1".into(),
                username: username.into(),
                ..Profile::default()
            })
        }

        async fn followers_page(
            &self,
            _user_id: &str,
            cursor: Option<&str>,
        ) -> Result<FollowerPage, SocialError> {
            self.seen.lock().unwrap().push(cursor.map(str::to_string));
            let (_, res) = self
                .pages
                .iter()
                .find(|(c, _)| *c == cursor)
                .expect("unexpected cursor");
            res.clone()
                .map_err(|_| SocialError::InvalidRequest("boom".into()))
        }
    }

    fn source(pages: Vec<(Option<&'static str>, Result<FollowerPage, ()>)>) -> Pages {
        Pages {
            pages,
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn walks_until_cursor_runs_out() {
        let src = source(vec![
            (None, Ok(page(&["a", "b"], Some("c1")))),
            (Some("c1"), Ok(page(&["c"], Some("c2")))),
            (Some("c2"), Ok(page(&["d"], None))),
        ]);
        let h = collect_followers(&src, "1", None, &Pacer::none()).await;
        assert_eq!(h.usernames, ["a", "b", "c", "d"]);
        assert_eq!(h.stop, StopReason::Exhausted);
        assert_eq!(h.pages, 3);
        assert_eq!(src.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn truncates_at_limit_and_stops_requesting() {
        let src = source(vec![
            (None, Ok(page(&["a", "b"], Some("c1")))),
            (Some("c1"), Ok(page(&["c", "d"], Some("c2")))),
        ]);
        let h = collect_followers(&src, "1", Some(3), &Pacer::none()).await;
        assert_eq!(h.usernames, ["a", "b", "c"]);
        assert_eq!(h.stop, StopReason::LimitReached);
        assert_eq!(src.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn zero_limit_means_unlimited() {
        let src = source(vec![(None, Ok(page(&["a", "b"], None)))]);
        let h = collect_followers(&src, "1", Some(0), &Pacer::none()).await;
        assert_eq!(h.usernames, ["a", "b"]);
        assert_eq!(h.stop, StopReason::Exhausted);
    }

    #[tokio::test]
    async fn failure_keeps_partial_list() {
        let src = source(vec![
            (None, Ok(page(&["a"], Some("c1")))),
            (Some("c1"), Err(())),
        ]);
        let h = collect_followers(&src, "1", None, &Pacer::none()).await;
        assert_eq!(h.usernames, ["a"]);
        assert!(h.is_partial());
        assert_eq!(h.pages, 1);
    }

    #[tokio::test]
    async fn repeated_cursor_ends_the_walk() {
        let src = source(vec![
            (None, Ok(page(&["a"], Some("c1")))),
            (Some("c1"), Ok(page(&["b"], Some("c1")))),
        ]);
        let h = collect_followers(&src, "1", None, &Pacer::none()).await;
        assert_eq!(h.usernames, ["a", "b"]);
        assert_eq!(h.stop, StopReason::Exhausted);
        assert_eq!(src.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn target_without_id_is_not_found() {
        struct NoId;
        #[async_trait]
        impl FollowerSource for NoId {
            async fn profile(&self, _username: &str) -> Result<Profile, SocialError> {
                Ok(Profile::default())
            }
            async fn followers_page(
                &self,
                _user_id: &str,
                _cursor: Option<&str>,
            ) -> Result<FollowerPage, SocialError> {
                Ok(FollowerPage::default())
            }
        }
        let err = resolve_target(&NoId, "ghost").await.unwrap_err();
        assert!(matches!(err, SocialError::ProfileNotFound(u) if u == "ghost"));
    }
}
