use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Process configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = get("MSGDROP_DB_PATH").unwrap_or_else(|| "message.db".into()).into();
        let host = get("MSGDROP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = get("MSGDROP_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("MSGDROP_PORT must be a port number")?;

        Ok(Self { db_path, host, port })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("message.db"));
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides_and_bad_port() {
        let cfg = Config::from_lookup(lookup(&[
            ("MSGDROP_DB_PATH", "/var/lib/msgdrop/message.db"),
            ("MSGDROP_HOST", "127.0.0.1"),
            ("MSGDROP_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/var/lib/msgdrop/message.db"));
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");

        assert!(Config::from_lookup(lookup(&[("MSGDROP_PORT", "http")])).is_err());
    }
}
