use rand::seq::SliceRandom;

/// Desktop Chrome string sent by the table scrapers; plain HTTP clients get a
/// 403 from some wikis.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_6) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Safari/605.1.15",
];

/// Pool of plausible desktop user agents; each call to [`UserAgentPool::pick`]
/// draws a fresh one.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new(DESKTOP_AGENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl UserAgentPool {
    /// An empty list falls back to [`BROWSER_USER_AGENT`].
    pub fn new(agents: Vec<String>) -> Self {
        let agents = if agents.is_empty() {
            vec![BROWSER_USER_AGENT.to_string()]
        } else {
            agents
        };
        Self { agents }
    }

    pub fn pick(&self) -> &str {
        let mut rng = rand::thread_rng();
        self.agents
            .choose(&mut rng)
            .map(String::as_str)
            .unwrap_or(BROWSER_USER_AGENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_comes_from_pool() {
        let pool = UserAgentPool::default();
        for _ in 0..20 {
            assert!(DESKTOP_AGENTS.contains(&pool.pick()));
        }
    }

    #[test]
    fn empty_pool_falls_back() {
        let pool = UserAgentPool::new(Vec::new());
        assert_eq!(pool.agents, vec![BROWSER_USER_AGENT.to_string()]);
        assert_eq!(pool.pick(), BROWSER_USER_AGENT);
    }
}
