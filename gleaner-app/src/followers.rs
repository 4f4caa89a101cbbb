use crate::cli::FollowersArgs;
use crate::console::Console;
use anyhow::{Context, anyhow};
use gleaner_common::Pacer;
use gleaner_config::{DelayMs, GleanerConfig};
use gleaner_http::UserAgentPool;
use gleaner_social::{
    InstagramApi, collect_followers, default_output_path, enrich, join_tags, resolve_target,
    write_profiles_csv,
};
use std::io::{BufRead, Write};
use std::sync::Arc;

fn pacer(range: DelayMs) -> Pacer {
    Pacer::from_millis(range.min, range.max)
}

/// Resolve the target, page its followers, enrich them with the worker pool
/// and write the tagged CSV.
///
/// Only a missing session or an unusable API setting is returned as an
/// error; remote failures are reported and end the run early.
pub async fn run<R: BufRead, W: Write>(
    args: FollowersArgs,
    cfg: &GleanerConfig,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let social = &cfg.social;
    let session = args
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| social.session_id())
        .ok_or_else(|| {
            anyhow!("no session id: pass --session-id, set GLEANER_SESSION_ID or social.session_id")
        })?
        .to_string();

    let (target_name, limit) = match args.target {
        Some(target) => (target.trim_start_matches('@').to_string(), args.limit),
        None => {
            let target = console.target()?;
            let limit = match args.limit {
                Some(limit) => Some(limit),
                None => console.limit()?,
            };
            (target, limit)
        }
    };
    let limit = limit.filter(|&n| n > 0);
    let workers = args.workers.unwrap_or(social.workers).max(1);

    let api = InstagramApi::new(&social.base_url, session)
        .with_context(|| format!("social.base_url {:?}", social.base_url))?
        .with_app_id(social.app_id.clone())
        .with_page_size(social.page_size)
        .with_user_agents(UserAgentPool::new(social.user_agents.clone()))
        .with_retries(cfg.http.retries);

    console.say(format_args!("Resolving @{target_name} ..."))?;
    let target = match resolve_target(&api, &target_name).await {
        Ok(target) => target,
        Err(e) if e.is_auth_failure() => {
            return Ok(console.report("session rejected, check the session id", &e)?);
        }
        Err(e) => {
            return Ok(console.report("could not resolve the target (check the session id)", &e)?);
        }
    };
    console.say(format_args!(
        "@{} (id {}) has {} followers. Collecting{} ...",
        target.username,
        target.id,
        target.follower_count,
        limit.map(|n| format!(" up to {n}")).unwrap_or_default()
    ))?;

    let harvest = collect_followers(&api, &target.id, limit, &pacer(social.page_delay_ms)).await;
    if harvest.is_partial() {
        console.say(format_args!(
            "warning: {}; continuing with {} usernames",
            harvest.stop,
            harvest.usernames.len()
        ))?;
    }
    if harvest.usernames.is_empty() {
        return Ok(console.say("No followers found or the connection failed.")?);
    }

    console.say(format_args!(
        "\nLooking up {} profiles with {workers} workers. This is slow on purpose.",
        harvest.usernames.len()
    ))?;
    let profiles = enrich(
        Arc::new(api),
        &harvest.usernames,
        workers,
        pacer(social.lookup_delay_ms),
    )
    .await;
    let Some(sample) = profiles.first() else {
        return Ok(console.say("Could not read any profile details.")?);
    };

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&target_name));
    if let Err(e) = write_profiles_csv(&output, &profiles) {
        return Ok(console.report("export failed", &e)?);
    }
    console.say(format_args!(
        "\nSaved {} profiles to {}",
        profiles.len(),
        output.display()
    ))?;
    console.say(format_args!(
        "Sample: {} | Tags: {}",
        sample.username,
        join_tags(&sample.tags)
    ))?;
    Ok(())
}
