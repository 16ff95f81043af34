use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::{Once, OnceLock};
use tracing::{debug, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling, rolling::Rotation};
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use tokenlist_core::ChainId;

static INIT: Once = Once::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub service_name: String,
    pub enable_colors: bool,
    pub enable_thread_ids: bool,
    pub enable_file_line: bool,
    /// Daily-rotated log files are written here when set.
    pub log_directory: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            service_name: "tokenlist-validator".to_string(),
            enable_colors: true,
            enable_thread_ids: false,
            enable_file_line: false,
            log_directory: None,
        }
    }
}

pub struct EnhancedLogger {
    config: LogConfig,
}

impl EnhancedLogger {
    pub fn new(config: LogConfig) -> Self {
        if let Some(directory) = &config.log_directory {
            if let Err(e) = fs::create_dir_all(directory) {
                eprintln!("Failed to create log directory: {e}");
            }
        }

        Self { config }
    }

    pub fn init(&self) {
        INIT.call_once(|| {
            let level = parse_level(&self.config.level);

            let env_filter = EnvFilter::new(
                std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| format!("tokenlist_validator={level},tokenlist_core={level}")),
            );

            let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = Vec::new();

            // stdout carries the report, logs go to stderr
            let console_layer = fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_thread_ids(self.config.enable_thread_ids)
                .with_file(self.config.enable_file_line)
                .with_line_number(self.config.enable_file_line)
                .with_ansi(self.config.enable_colors)
                .with_writer(std::io::stderr);
            layers.push(Box::new(console_layer));

            if let Some(directory) = &self.config.log_directory {
                let file_appender = rolling::RollingFileAppender::new(
                    Rotation::DAILY,
                    directory,
                    format!("{}.log", self.config.service_name),
                );
                let (non_blocking_file_appender, guard) = non_blocking(file_appender);
                let _ = FILE_GUARD.set(guard);
                let file_layer = fmt::layer()
                    .with_timer(UtcTime::rfc_3339())
                    .with_thread_ids(self.config.enable_thread_ids)
                    .with_file(self.config.enable_file_line)
                    .with_line_number(self.config.enable_file_line)
                    .with_ansi(false)
                    .with_writer(non_blocking_file_appender);
                layers.push(Box::new(file_layer));
            }

            let subscriber = Registry::default().with(env_filter).with(layers);

            if subscriber.try_init().is_err() {
                eprintln!("A global tracing subscriber is already installed");
            }
        });
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub struct Logger;

impl Logger {
    pub fn init(log_level: &str, log_directory: Option<String>) {
        let config = LogConfig {
            level: log_level.to_string(),
            log_directory,
            ..LogConfig::default()
        };
        EnhancedLogger::new(config).init();
    }

    pub fn entry_checked(key: &str, errors: usize, warnings: usize) {
        debug!("Entry {} checked: {} errors, {} warnings", key, errors, warnings);
    }

    pub fn rpc_call_failed(chain: ChainId, address: &str, call: &str, error: &str) {
        debug!("RPC {} failed for {} on chain {}: {}", call, address, chain, error);
    }

    pub fn external_list_unavailable(source: &str, error: &str) {
        warn!("External token list {} unavailable, skipping cross-list checks: {}", source, error);
    }

    pub fn run_finished(entries: usize, errors: usize, warnings: usize) {
        info!(
            "Validated {} entries: {} errors, {} warnings",
            entries, errors, warnings
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_init_is_idempotent() {
        Logger::init("debug", None);
        Logger::init("info", None);
        Logger::entry_checked("FOO", 0, 1);
    }
}
