use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Server settings, read from the command line with environment variables
/// (and a `.env` file) as fallback.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ApiConfig {
    #[arg(short, long, env = "API_ADDRESS", default_value_t = String::from("127.0.0.1"))]
    /// IP address to listen on
    pub addr: String,
    #[arg(short, long, env = "API_PORT", default_value_t = 50051)]
    /// Port to listen on
    pub port: u16,
    #[arg(long, env = "DATABASE_URL", default_value_t = String::from("sqlite:playlists.db"))]
    /// SQLite connection URL, the database file is created if missing
    pub database_url: String,
    #[arg(long, env = "MAX_DB_CONNECTIONS", default_value_t = 5)]
    pub max_db_connections: u32,
    #[arg(long, env = "LOG_LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
    #[arg(long, env = "LOG_FILE")]
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl ApiConfig {
    pub fn init_logger(&self) -> std::io::Result<()> {
        match &self.log_file {
            Some(path) => simple_logging::log_to_file(path, self.log_level),
            None => {
                simple_logging::log_to_stderr(self.log_level);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_explicit_args() {
        let config = ApiConfig::try_parse_from([
            "playlist-api",
            "--addr",
            "0.0.0.0",
            "--port",
            "8080",
            "--database-url",
            "sqlite::memory:",
            "--max-db-connections",
            "1",
            "--log-level",
            "debug",
            "--log-file",
            "api.log",
        ])
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_db_connections, 1);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("api.log")));
    }

    #[test]
    fn test_reject_invalid_values() {
        assert!(ApiConfig::try_parse_from(["playlist-api", "--port", "not-a-port"]).is_err());
        assert!(ApiConfig::try_parse_from(["playlist-api", "--log-level", "loud"]).is_err());
    }
}
