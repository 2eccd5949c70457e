use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::thread;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    pub spam: SpamConfig,
    /// Overrides the built-in bank roster when set. Validated at startup.
    #[serde(default)]
    pub banks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    pub transaction_path: String,
    pub hello_path: String,
    pub http_timeout_seconds: u64,
}

impl TargetConfig {
    pub fn transaction_url(&self) -> String {
        join_url(&self.base_url, &self.transaction_path)
    }

    pub fn hello_url(&self) -> String {
        join_url(&self.base_url, &self.hello_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpamConfig {
    pub transactions: usize,
    pub workers: usize,
    pub sum_lo: i64,
    pub sum_hi: i64,
}

impl SpamConfig {
    /// Worker pool size. 0 means auto: half the available CPU
    /// parallelism, minimum 1.
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(|n| n.get() / 2)
            .unwrap_or(1)
            .max(1)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("SPAMMER__").split("__"));
        Ok(figment.extract()?)
    }
}
