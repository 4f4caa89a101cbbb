//! Loader for gleaner settings: optional YAML file + `GLEANER__` environment
//! overlay + `${VAR}` expansion.
//!
//! Every field has a default, so an empty loader yields a usable config.
//! Nested keys map to environment variables with `__` separators, e.g.
//! `GLEANER__SOCIAL__WORKERS=3` overrides `social.workers`.
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_PHRASES_URL: &str = "https://en.wikipedia.org/wiki/List_of_Latin_phrases_(full)";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GleanerConfig {
    #[serde(deserialize_with = "opt_string_or_number")]
    pub version: Option<String>,
    pub log: LogSettings,
    pub http: HttpSettings,
    pub tables: TableSettings,
    pub social: SocialSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub dir: Option<String>,
    pub stderr: bool,
    /// `text` or `json`.
    pub format: String,
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            stderr: false,
            format: "text".into(),
            filter: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    /// Retries for 429/5xx and transport errors. Zero keeps the one-shot behavior.
    pub retries: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            retries: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub phrases_url: String,
    pub phrases_output: String,
    pub tables_output: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            phrases_url: DEFAULT_PHRASES_URL.into(),
            phrases_output: "latin_phrases.xlsx".into(),
            tables_output: "table_results.xlsx".into(),
        }
    }
}

/// Inclusive millisecond range for a polite delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayMs {
    pub min: u64,
    pub max: u64,
}

impl DelayMs {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

const PAGE_DELAY_MS: DelayMs = DelayMs::new(2000, 4000);
const LOOKUP_DELAY_MS: DelayMs = DelayMs::new(200, 1200);

/// A range as written in a source; either bound may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialDelay {
    min: Option<u64>,
    max: Option<u64>,
}

impl PartialDelay {
    fn or(self, fallback: DelayMs) -> DelayMs {
        DelayMs {
            min: self.min.unwrap_or(fallback.min),
            max: self.max.unwrap_or(fallback.max),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocialSettings {
    pub base_url: String,
    #[serde(deserialize_with = "opt_string_or_number")]
    session_id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub app_id: String,
    pub page_size: u32,
    pub workers: usize,
    #[serde(deserialize_with = "page_delay_ms")]
    pub page_delay_ms: DelayMs,
    #[serde(deserialize_with = "lookup_delay_ms")]
    pub lookup_delay_ms: DelayMs,
    pub user_agents: Vec<String>,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.instagram.com".into(),
            session_id: None,
            app_id: "936619743392459".into(),
            page_size: 50,
            workers: 2,
            page_delay_ms: PAGE_DELAY_MS,
            lookup_delay_ms: LOOKUP_DELAY_MS,
            user_agents: Vec::new(),
        }
    }
}

impl SocialSettings {
    /// The session cookie, if one was configured and its placeholder resolved.
    ///
    /// ```
    /// use gleaner_config::GleanerConfigLoader;
    ///
    /// let cfg = GleanerConfigLoader::new()
    ///     .with_yaml_str("social:\n  session_id: '${GLEANER_DOCTEST_UNSET_VAR}'")
    ///     .load()
    ///     .unwrap();
    /// assert_eq!(cfg.social.session_id(), None);
    /// ```
    pub fn session_id(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains("${"))
    }

    pub fn set_session_id(&mut self, value: impl Into<String>) {
        self.session_id = Some(value.into());
    }
}

fn string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn page_delay_ms<'de, D>(d: D) -> Result<DelayMs, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PartialDelay::deserialize(d)?.or(PAGE_DELAY_MS))
}

fn lookup_delay_ms<'de, D>(d: D) -> Result<DelayMs, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PartialDelay::deserialize(d)?.or(LOOKUP_DELAY_MS))
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring.
pub struct GleanerConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for GleanerConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl GleanerConfigLoader {
    /// Start empty; the `GLEANER__` environment overlay is applied last in
    /// [`GleanerConfigLoader::load`], so environment values beat files.
    ///
    /// ```
    /// use gleaner_config::GleanerConfigLoader;
    ///
    /// let cfg = GleanerConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(cfg.social.workers, 2);
    /// assert_eq!(cfg.social.page_size, 50);
    /// assert_eq!(cfg.http.retries, 0);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred from
    /// the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests, CLI overrides).
    ///
    /// ```
    /// use gleaner_config::GleanerConfigLoader;
    ///
    /// let cfg = GleanerConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// social:
    ///   workers: 4
    ///   page_delay_ms: { min: 10, max: 20 }
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert_eq!(cfg.social.workers, 4);
    /// assert_eq!(cfg.social.page_delay_ms, gleaner_config::DelayMs::new(10, 20));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Build the merged sources, expand `${VAR}` placeholders and deserialize.
    pub fn load(self) -> Result<GleanerConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("GLEANER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);
        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
