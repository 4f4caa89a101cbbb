use crate::error::TableError;
use crate::parse::parse_tables;
use crate::table::Table;
use gleaner_http::{BROWSER_USER_AGENT, HttpClient, RequestOpts};
use regex::Regex;
use std::time::Duration;

/// Downloads pages the way a desktop browser would, so wikis that reject
/// bare HTTP clients still answer.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    timeout: Duration,
    retries: usize,
    user_agent: String,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 0,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// GET `url` and return the body as text. Non-2xx is an error.
    pub async fn fetch_html(&self, url: &str) -> Result<String, TableError> {
        let fetch_err = |source| TableError::Fetch {
            url: url.to_string(),
            source,
        };
        let client = HttpClient::new(url)
            .map_err(fetch_err)?
            .with_timeout(self.timeout)
            .with_retries(self.retries)
            .with_user_agent(self.user_agent.clone());
        let html = client
            .get_text(
                url,
                RequestOpts {
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(fetch_err)?;
        tracing::info!(target: "tables.fetch", %url, bytes = html.len(), "page downloaded");
        Ok(html)
    }

    /// Download `url` and keep the tables whose text matches `pattern`.
    /// Finding none is an error.
    pub async fn fetch_tables(&self, url: &str, pattern: &str) -> Result<Vec<Table>, TableError> {
        let re = Regex::new(pattern)?;
        let html = self.fetch_html(url).await?;
        let tables = parse_tables(&html, Some(&re));
        if tables.is_empty() {
            return Err(TableError::NoTables {
                url: url.to_string(),
                pattern: pattern.to_string(),
            });
        }
        tracing::info!(target: "tables.fetch", %url, tables = tables.len(), "tables matched");
        Ok(tables)
    }
}
