//! Console configuration
//!
//! Every option can be set through the environment (a `.env` file is loaded
//! first) and overridden on the command line.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | ROSTER_API_URL | http://localhost:8080/api | Employees and auth API |
//! | ROSTER_USERS_API_URL | ROSTER_API_URL | Users API |
//! | ROSTER_DATA_DIR | .roster | Session storage and downloads |
//! | ROSTER_REQUEST_TIMEOUT_SECS | none | Per-request timeout |
//! | ROSTER_SHOW_DEMO_USERS | true | List demo credentials on login |
//! | ROSTER_LOG_LEVEL | info | Log filter when RUST_LOG is unset |
//! | ROSTER_LOG_DIR | none | Daily-rolling log files |

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use roster_client::ClientConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Console front-end for the employees and users admin panels")]
pub struct Config {
    /// Base URL of the employees and auth API
    #[arg(long, env = "ROSTER_API_URL", default_value = "http://localhost:8080/api")]
    pub api_url: String,

    /// Base URL of the users API
    #[arg(long, env = "ROSTER_USERS_API_URL")]
    pub users_api_url: Option<String>,

    /// Directory holding the stored session and downloaded builds
    #[arg(long, env = "ROSTER_DATA_DIR", default_value = ".roster")]
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "ROSTER_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// List demo credentials on the web login form
    #[arg(long, env = "ROSTER_SHOW_DEMO_USERS", default_value_t = true, action = ArgAction::Set)]
    pub show_demo_users: bool,

    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write logs here instead of stderr
    #[arg(long, env = "ROSTER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the environment and command line
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    fn client_config(&self, base_url: &str) -> ClientConfig {
        let config = ClientConfig::new(base_url);
        match self.request_timeout_secs {
            Some(seconds) => config.with_timeout(seconds),
            None => config,
        }
    }

    pub fn api_client(&self) -> ClientConfig {
        self.client_config(&self.api_url)
    }

    pub fn users_client(&self) -> ClientConfig {
        self.client_config(self.users_api_url.as_deref().unwrap_or(&self.api_url))
    }

    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.data_dir.join("downloads")
    }
}
