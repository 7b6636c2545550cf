use std::env;
use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Flat hazard cost used when a request does not carry its own.
    pub hazard_cost: Option<i64>,
    pub max_expansions: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, hazard_cost: None, max_expansions: None }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("BURGERBOT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BURGERBOT_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let hazard_cost: Option<i64> = parse_var("BURGERBOT_HAZARD_COST")?;
        if let Some(c) = hazard_cost {
            anyhow::ensure!(c >= 0, "BURGERBOT_HAZARD_COST={c} must not be negative");
        }
        let max_expansions = parse_var("BURGERBOT_MAX_EXPANSIONS")?;

        Ok(Self {
            host,
            port,
            hazard_cost,
            max_expansions,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).with_context(|| format!("{name}={raw:?} is not a valid number")),
        Err(_) => Ok(None),
    }
}
