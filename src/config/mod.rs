pub mod toml_config;

use crate::adapters::http::DEFAULT_REGISTRY_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mycars")]
#[command(about = "Car registry with ratings, validated against the NHTSA vehicle registry")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: String,

    #[arg(long, default_value = "sqlite://mycars.db")]
    pub database_url: String,

    #[arg(long, default_value = "5")]
    pub max_connections: u32,

    #[arg(long, default_value = DEFAULT_REGISTRY_ENDPOINT)]
    pub registry_endpoint: String,

    #[arg(long, help = "Abort registry lookups after this many seconds (no limit by default)")]
    pub registry_timeout_seconds: Option<u64>,

    #[arg(long, default_value = "10")]
    pub page_size: usize,

    #[arg(long, help = "Load settings from a TOML file instead of the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn database_url(&self) -> &str {
        &self.database_url
    }

    fn max_connections(&self) -> u32 {
        self.max_connections
    }

    fn registry_endpoint(&self) -> &str {
        &self.registry_endpoint
    }

    fn registry_timeout_seconds(&self) -> Option<u64> {
        self.registry_timeout_seconds
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("--bind", &self.bind)?;
        validation::validate_database_url("--database-url", &self.database_url)?;
        validation::validate_positive_number("--max-connections", self.max_connections as usize, 1)?;
        validation::validate_url("--registry-endpoint", &self.registry_endpoint)?;
        if let Some(timeout) = self.registry_timeout_seconds {
            validation::validate_positive_number("--registry-timeout-seconds", timeout as usize, 1)?;
        }
        validation::validate_range("--page-size", self.page_size, 1, 1000)?;
        Ok(())
    }
}
