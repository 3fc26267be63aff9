//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::Parser;

use crate::domain::config::AppConfig;

/// Scribe Server - upload audio, get a speaker-labelled transcript
#[derive(Parser, Debug)]
#[command(name = "scribe-server")]
#[command(version)]
#[command(about = "HTTP transcription service backed by Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file (default: ./scribe-server.toml, then the XDG config dir)
    #[arg(short = 'c', long, value_name = "PATH", env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, value_name = "HOST", env = "SCRIBE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT", env = "SCRIBE_PORT")]
    pub port: Option<u16>,

    /// Directory for uploads waiting to be transcribed
    #[arg(long, value_name = "DIR", env = "SCRIBE_UPLOAD_DIR")]
    pub upload_dir: Option<String>,

    /// Largest accepted upload, in MiB
    #[arg(long, value_name = "MB", env = "SCRIBE_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// Gemini model used for transcription
    #[arg(short = 'm', long, value_name = "MODEL", env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Seconds between readiness checks of an uploaded file
    #[arg(long, value_name = "SECS", env = "SCRIBE_POLL_INTERVAL_SECS")]
    pub poll_interval_secs: Option<u64>,

    /// Give up after this many readiness checks (0 = never)
    #[arg(long, value_name = "N", env = "SCRIBE_POLL_MAX_ATTEMPTS")]
    pub poll_max_attempts: Option<u32>,

    /// What happens to finished tasks once read (retain, evict_on_read)
    #[arg(long, value_name = "POLICY", env = "SCRIBE_RETENTION")]
    pub retention: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Settings given on the command line or through their env variables
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            upload_dir: self.upload_dir.clone(),
            max_upload_mb: self.max_upload_mb,
            model: self.model.clone(),
            poll_interval_secs: self.poll_interval_secs,
            poll_max_attempts: self.poll_max_attempts,
            retention: self.retention.clone(),
            log_json: if self.log_json { Some(true) } else { None },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["scribe-server"]);
        assert!(!cli.log_json);
        assert!(cli.to_config().log_json.is_none());
    }

    #[test]
    fn cli_parses_server_options() {
        let cli = Cli::parse_from([
            "scribe-server",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--upload-dir",
            "/tmp/scribe",
            "--retention",
            "evict_on_read",
            "--log-json",
        ]);

        let config = cli.to_config();
        assert_eq!(config.host, Some("0.0.0.0".to_string()));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.upload_dir, Some("/tmp/scribe".to_string()));
        assert_eq!(config.retention, Some("evict_on_read".to_string()));
        assert_eq!(config.log_json, Some(true));
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::parse_from(["scribe-server", "-c", "/etc/scribe.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/scribe.toml")));
    }

    #[test]
    fn cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["scribe-server", "--port", "http"]).is_err());
    }

    #[test]
    fn cli_never_carries_api_key() {
        let cli = Cli::parse_from(["scribe-server", "-m", "gemini-2.5-pro"]);
        let config = cli.to_config();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, Some("gemini-2.5-pro".to_string()));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
