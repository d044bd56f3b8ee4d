//! Runtime configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | SNAPSHOT_DEBOUNCE_MS | 5 | Delay before a whole-tree snapshot is applied |
//! | AUDIT_FLUSH_MS | 1000 | Trailing-edge debounce for audit batch flushes |
//! | AUDIT_LOGGING_ENABLED | true | Master switch for the audit log |
//! | LOG_LEVEL | info | Tracing level filter |
//! | LOG_DIR | (unset) | Optional directory for daily-rolling log files |

use crate::zones::ZoneStatus;

#[derive(Debug, Clone)]
pub struct Config {
    /// Debounce window for whole-tree snapshot application (milliseconds).
    pub snapshot_debounce_ms: u64,
    /// Trailing-edge debounce for audit batch flushes (milliseconds).
    pub audit_flush_ms: u64,
    /// Master switch for audit logging.
    pub logging_enabled: bool,
    /// Status assumed for zones with no record yet.
    pub default_status: ZoneStatus,
    /// Tracing level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional log file directory (daily rolling).
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            snapshot_debounce_ms: std::env::var("SNAPSHOT_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            audit_flush_ms: std::env::var("AUDIT_FLUSH_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            logging_enabled: std::env::var("AUDIT_LOGGING_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            default_status: ZoneStatus::Available,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_debounce_ms: 5,
            audit_flush_ms: 1000,
            logging_enabled: true,
            default_status: ZoneStatus::Available,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}
