use std::{env, num::NonZeroUsize, path::PathBuf};

use anyhow::Context;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_PATH: &str = "model.json";
const DEFAULT_DATABASE_PATH: &str = "user_data.db";

/// Immutable process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    model_path: PathBuf,
    database_path: PathBuf,
    workers: Option<NonZeroUsize>,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `MODEL_PATH`, `DATABASE_PATH` and `WORKERS`
    /// from the process environment, falling back to defaults.
    ///
    /// # Errors
    /// Fails if `PORT` or `WORKERS` is set but not a valid number.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let workers = match lookup("WORKERS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<NonZeroUsize>()
                    .with_context(|| format!("WORKERS must be a positive integer, got '{raw}'"))?,
            ),
            None => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            workers,
        })
    }

    /// Returns the `host:port` pair the server binds to.
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    pub fn database_path(&self) -> &PathBuf {
        &self.database_path
    }

    /// Returns the actix worker count, if one was configured.
    pub fn workers(&self) -> Option<usize> {
        self.workers.map(NonZeroUsize::get)
    }
}
