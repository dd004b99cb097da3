use anyhow::Result;
use journal_scout::config::env_parse;
use journal_scout::ScoutConfig;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub scout: ScoutConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let default_addr: SocketAddr = DEFAULT_BIND_ADDR.parse()?;

        Ok(Self {
            bind_addr: env_parse("BIND_ADDR", default_addr)?,
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            scout: ScoutConfig::from_env()?,
        })
    }
}
