use anyhow::{Context, Result};
use clap::Parser;
use std::env;

const DEFAULT_PORT: u16 = 5000;

#[derive(Parser, Debug)]
#[command(name = "formdrop")]
#[command(about = "Runs the formdrop service", long_about = None)]
pub struct Cli {
    /// Overrides the PORT environment variable.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct Config {
    database_url: String,
    auth_token: Option<String>,
    port: u16,
}

impl Config {
    pub fn new(database_url: &str, auth_token: Option<String>, port: u16) -> Self {
        Config {
            database_url: database_url.to_string(),
            auth_token,
            port,
        }
    }

    /// Reads configuration from the environment. `DATABASE_URL` is required;
    /// `PORT` defaults to 5000 when unset.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;
        let auth_token = env::var("DATABASE_AUTH_TOKEN").ok();
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            database_url,
            auth_token,
            port,
        })
    }

    pub fn get_database_url(&self) -> &str {
        &self.database_url
    }

    pub fn get_auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
