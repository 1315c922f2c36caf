// Command line / environment configuration. Every option can also come
// from an environment variable so the client can be pointed at another
// backend without retyping flags.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "nutri", about = "Terminal client for the nutrition & health tracker")]
pub struct Config {
    /// Backend base URL.
    #[arg(long, env = "NUTRI_API_URL", default_value = "http://localhost:8088")]
    pub base_url: String,

    /// Directory holding the session markers (defaults to ~/.nutri).
    #[arg(long, env = "NUTRI_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Default request timeout in seconds.
    #[arg(long, env = "NUTRI_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Log filter, e.g. `debug` or `nutri_cli=trace`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log: String,

    /// Page to open on start.
    #[arg(default_value = "/")]
    pub start: String,
}

impl Config {
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".nutri")
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_win() {
        let cfg = Config::try_parse_from([
            "nutri",
            "--base-url",
            "http://10.0.0.2:9000",
            "--session-dir",
            "/tmp/nutri-test",
            "--timeout-secs",
            "3",
            "/diet/list",
        ])
        .unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.2:9000");
        assert_eq!(cfg.session_dir(), PathBuf::from("/tmp/nutri-test"));
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.start, "/diet/list");
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Config::try_parse_from(["nutri", "--timeout-secs", "soon"]).is_err());
    }

    #[test]
    fn session_dir_falls_back_to_home() {
        let cfg = Config {
            base_url: "http://x".into(),
            session_dir: None,
            timeout_secs: 1,
            log: "warn".into(),
            start: "/".into(),
        };
        assert!(cfg.session_dir().ends_with(".nutri"));
    }
}
