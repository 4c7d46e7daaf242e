use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";

// Service configuration sourced from environment variables, optionally
// overridden by a YAML file named in PETSTORE_CONFIG.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
}

#[derive(Debug, Deserialize)]
struct ApiConfigOverride {
    host: Option<String>,
    port: Option<u16>,
    metrics_bind: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let host: IpAddr = std::env::var("PETSTORE_HOST")
            .unwrap_or_else(|_| DEFAULT_HOST.to_string())
            .parse()
            .with_context(|| "parse PETSTORE_HOST")?;
        let port = match std::env::var("PETSTORE_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| "parse PETSTORE_PORT")?,
            Err(_) => DEFAULT_PORT,
        };
        let metrics_bind = std::env::var("PETSTORE_METRICS_BIND")
            .unwrap_or_else(|_| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse PETSTORE_METRICS_BIND")?;
        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            metrics_bind,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("PETSTORE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read PETSTORE_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: ApiConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse petstore config yaml")?;
        if let Some(value) = override_cfg.host {
            let host: IpAddr = value.parse().with_context(|| "parse host")?;
            self.bind_addr.set_ip(host);
        }
        if let Some(port) = override_cfg.port {
            self.bind_addr.set_port(port);
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        Ok(())
    }
}
