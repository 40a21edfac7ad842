use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub registry: RegistryConfig,
    pub pagination: Option<PaginationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_socket_addr("server.bind", &self.server.bind)?;
        crate::utils::validation::validate_database_url("database.url", &self.database.url)?;
        crate::utils::validation::validate_url("registry.endpoint", &self.registry.endpoint)?;

        if let Some(max) = self.database.max_connections {
            crate::utils::validation::validate_positive_number(
                "database.max_connections",
                max as usize,
                1,
            )?;
        }

        if let Some(timeout) = self.registry.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "registry.timeout_seconds",
                timeout as usize,
                1,
            )?;
        }

        crate::utils::validation::validate_range(
            "pagination.page_size",
            self.page_size(),
            1,
            1000,
        )?;

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn database_url(&self) -> &str {
        &self.database.url
    }

    fn max_connections(&self) -> u32 {
        self.database.max_connections.unwrap_or(5)
    }

    fn registry_endpoint(&self) -> &str {
        &self.registry.endpoint
    }

    fn registry_timeout_seconds(&self) -> Option<u64> {
        self.registry.timeout_seconds
    }

    fn page_size(&self) -> usize {
        self.pagination
            .as_ref()
            .and_then(|p| p.page_size)
            .unwrap_or(10)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
