//! Service configuration
//!
//! Settings resolve CLI flag first, then environment variable, then the
//! compiled default.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

/// Social activity monitor HTTP API
#[derive(Debug, Clone, Parser)]
#[command(name = "smon-api", version)]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "SMON_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port for the HTTP listener
    #[arg(long, env = "SMON_PORT", default_value_t = 5000)]
    pub port: u16,

    /// SQLite database path, created on first run
    #[arg(long, env = "SMON_DATABASE", default_value = "smon.db")]
    pub database: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["smon-api"]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.database, PathBuf::from("smon.db"));
        assert_eq!(config.bind.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let config =
            Config::parse_from(["smon-api", "--port", "8080", "--database", "/tmp/x.db"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, PathBuf::from("/tmp/x.db"));
    }
}
