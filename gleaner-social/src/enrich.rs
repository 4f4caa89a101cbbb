//! Fixed-size worker pool that turns usernames into tagged profiles.
//!
//! The list is split into at most `workers` contiguous chunks and each chunk
//! is walked sequentially by one task. Profiles come back in the order the
//! workers finish, not in input order.
use crate::profile::Profile;
use crate::source::FollowerSource;
use gleaner_common::Pacer;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Split `items` into at most `workers` contiguous chunks of
/// `ceil(len / workers)` items. `workers` of 0 is treated as 1.
///
/// ```
/// let chunks = gleaner_social::chunk(&[1, 2, 3, 4, 5], 2);
/// assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5]]);
/// ```
pub fn chunk<T: Clone>(items: &[T], workers: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let size = items.len().div_ceil(workers.max(1));
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Fetch and tag every username with `workers` concurrent tasks, each
/// awaiting `pacer` before every lookup. Failed lookups are logged and
/// skipped; a worker that panics loses only its own chunk.
pub async fn enrich<S>(
    source: Arc<S>,
    usernames: &[String],
    workers: usize,
    pacer: Pacer,
) -> Vec<Profile>
where
    S: FollowerSource + ?Sized + 'static,
{
    let chunks = chunk(usernames, workers);
    tracing::info!(
        target: "social.enrich",
        total = usernames.len(),
        workers = chunks.len(),
        "enrichment started"
    );

    let mut set = JoinSet::new();
    for (worker, names) in chunks.into_iter().enumerate() {
        let source = Arc::clone(&source);
        set.spawn(async move { run_worker(worker + 1, source.as_ref(), names, pacer).await });
    }

    let mut profiles = Vec::with_capacity(usernames.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(batch) => profiles.extend(batch),
            Err(e) => {
                tracing::error!(target: "social.enrich", error = %e, "worker aborted, chunk lost");
            }
        }
    }

    tracing::info!(
        target: "social.enrich",
        requested = usernames.len(),
        enriched = profiles.len(),
        "enrichment finished"
    );
    profiles
}

async fn run_worker<S>(
    worker: usize,
    source: &S,
    names: Vec<String>,
    pacer: Pacer,
) -> Vec<Profile>
where
    S: FollowerSource + ?Sized,
{
    let total = names.len();
    let mut out = Vec::with_capacity(total);
    for (i, username) in names.iter().enumerate() {
        tracing::info!(
            target: "social.enrich",
            worker,
            progress = %format!("{}/{total}", i + 1),
            %username,
            "looking up profile"
        );
        pacer.pause().await;
        match source.profile(username).await {
            Ok(profile) => out.push(profile.classified()),
            Err(e) => tracing::warn!(
                target: "social.enrich",
                worker,
                %username,
                error = %e,
                "profile lookup failed, skipping"
            ),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tag;
    use crate::error::SocialError;
    use crate::source::FollowerPage;
    use async_trait::async_trait;

    #[test]
    fn chunking_is_ceil_and_contiguous() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(
            chunk(&items, 3),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]
        );
        assert_eq!(chunk(&items, 1), vec![items.clone()]);
        assert_eq!(chunk(&items, 0), vec![items.clone()]);
        assert_eq!(chunk(&items, 10).len(), 7);
        assert!(chunk::<u32>(&[], 2).is_empty());
    }

    #[test]
    fn chunk_count_never_exceeds_workers() {
        for len in 1..40usize {
            let items: Vec<usize> = (0..len).collect();
            for workers in 1..8 {
                let chunks = chunk(&items, workers);
                assert!(chunks.len() <= workers);
                assert_eq!(chunks.concat(), items);
            }
        }
    }

    struct Lookup;

    #[async_trait]
    impl FollowerSource for Lookup {
        async fn profile(&self, username: &str) -> Result<Profile, SocialError> {
            match username {
                "panic" => panic!("worker blew up"),
                u if u.starts_with("bad") => Err(SocialError::ProfileNotFound(u.into())),
                u => Ok(Profile {
                    id: u.into(),
                    username: u.into(),
                    ..Profile::default()
                }),
            }
        }

        async fn followers_page(
            &self,
            _user_id: &str,
            _cursor: Option<&str>,
        ) -> Result<FollowerPage, SocialError> {
            Ok(FollowerPage::default())
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn failed_lookups_are_skipped() {
        let input = names(&["a", "bad1", "b", "c", "bad2"]);
        let mut got: Vec<String> = enrich(Arc::new(Lookup), &input, 2, Pacer::none())
            .await
            .into_iter()
            .map(|p| {
                assert_eq!(p.tags, vec![Tag::StandardUser]);
                p.username
            })
            .collect();
        got.sort();
        assert_eq!(got, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn panicking_worker_loses_only_its_chunk() {
        let input = names(&["a", "b", "panic", "c"]);
        let mut got: Vec<String> = enrich(Arc::new(Lookup), &input, 2, Pacer::none())
            .await
            .into_iter()
            .map(|p| p.username)
            .collect();
        got.sort();
        assert_eq!(got, ["a", "b"]);
    }

    #[tokio::test]
    async fn trait_objects_work_as_sources() {
        let source: Arc<dyn FollowerSource> = Arc::new(Lookup);
        let got = enrich(source, &names(&["x"]), 4, Pacer::none()).await;
        assert_eq!(got.len(), 1);
        assert!(enrich(Arc::new(Lookup), &[], 2, Pacer::none()).await.is_empty());
    }
}
