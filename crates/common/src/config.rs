use crate::error::{Error, Result};
use crate::prompt::PromptProfile;
use faststr::FastStr;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key:         Option<FastStr>,
    pub api_base:        FastStr,
    pub model:           FastStr,
    pub profile:         PromptProfile,
    pub addr:            SocketAddr,
    pub connect_timeout: Duration,
    pub log_dir:         Option<PathBuf>,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").map(FastStr::from);
        let api_base = get("OPENAI_API_BASE")
            .map(FastStr::from)
            .unwrap_or_else(|| FastStr::from_static_str(DEFAULT_API_BASE));
        let model = get("RELAY_MODEL")
            .map(FastStr::from)
            .unwrap_or_else(|| FastStr::from_static_str(DEFAULT_MODEL));
        let profile = match get("RELAY_PROMPT_PROFILE") {
            Some(v) => v.parse::<PromptProfile>()?,
            None => PromptProfile::default(),
        };
        let addr = get("RELAY_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| Error::InvalidConfig("RELAY_ADDR", e.to_string().into()))?;
        let connect_timeout = match get("RELAY_CONNECT_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                Error::InvalidConfig("RELAY_CONNECT_TIMEOUT_SECS", e.to_string().into())
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };
        let log_dir = get("RELAY_LOG_DIR").map(PathBuf::from);

        Ok(Self {
            api_key,
            api_base,
            model,
            profile,
            addr,
            connect_timeout: Duration::from_secs(connect_timeout),
            log_dir,
        })
    }
}
