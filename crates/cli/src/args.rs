use clap::{Parser, ValueEnum};
use stockroom_observability::{LogConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Inventory and ordering for a single store.")]
pub struct CommandLine {
    /// Log line format (logs are written to stderr)
    #[arg(long, env = "STOCKROOM_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "STOCKROOM_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format.into(),
            default_directive: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_log_config() {
        let args = CommandLine::try_parse_from([
            "stockroom",
            "--log-format",
            "json",
            "--log-level",
            "stockroom_store=debug",
        ])
        .unwrap();
        let config = args.log_config();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.default_directive, "stockroom_store=debug");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(CommandLine::try_parse_from(["stockroom", "--log-format", "xml"]).is_err());
    }
}
