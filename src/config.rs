//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::logging::LogConfig;
use crate::processor::ProcessorConfig;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Item service - CRUD API with concurrent batch reprocessing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "ITEM_SERVICE_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Maximum number of items processed at the same time
    /// (default: number of CPUs)
    #[arg(long, env = "ITEM_SERVICE_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Simulated work per item in milliseconds; 0 disables it
    #[arg(long, env = "ITEM_SERVICE_DELAY_MS", default_value_t = 100)]
    pub delay_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "ITEM_SERVICE_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "ITEM_SERVICE_LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

impl Args {
    pub fn processor_config(&self) -> ProcessorConfig {
        let config =
            ProcessorConfig::default().with_fixed_delay(Duration::from_millis(self.delay_ms));
        match self.concurrency {
            Some(n) => config.with_concurrency(n),
            None => config,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level,
            json_format: self.log_json,
        }
    }
}
