use std::sync::OnceLock;

use gleaner_common::observability::{LogConfig, LogFormat};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

/// Route test logs to a temp dir and stderr (shown by `--nocapture`).
pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "gleaner-tests",
            log_dir: Some(std::env::temp_dir().join("gleaner-tests")),
            emit_stderr: true,
            format: LogFormat::parse(&std::env::var("GLEANER_LOG_FORMAT").unwrap_or_default()),
            default_filter: "debug".into(),
        };

        gleaner_common::observability::init_logging(config).unwrap_or_default()
    });
}
