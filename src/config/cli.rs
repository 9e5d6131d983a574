use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::Parser;
use std::time::Duration;

/// Listener and logging options. WebUntis credentials come from [`super::UntisConfig`].
#[derive(Debug, Clone, Parser)]
#[command(name = "untis-json")]
#[command(about = "Serves a WebUntis class timetable as normalized JSON")]
pub struct CliConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    #[arg(
        long,
        env = "UNTIS_TIMEOUT_SECS",
        default_value = "30",
        help = "Timeout for each WebUntis request"
    )]
    pub timeout_secs: u64,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        Ok(())
    }
}
