use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default dataset published by the upstream recipe scraper.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/shelley021/recipes/main/API/public/final_recipes_with_directions.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: DatasetConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub url: String,
    pub max_size: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub api_max_limit: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let dataset_url =
            std::env::var("DATASET_URL").unwrap_or_else(|_| DEFAULT_DATASET_URL.to_string());

        let max_size = std::env::var("DATASET_MAX_SIZE")
            .unwrap_or_else(|_| "67108864".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATASET_MAX_SIZE value".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let api_rate_limit = std::env::var("API_RATE_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_RATE_LIMIT value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        let page_size = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PAGE_SIZE value".to_string()))?;

        let api_max_limit = std::env::var("API_MAX_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_MAX_LIMIT value".to_string()))?;

        Ok(Settings {
            dataset: DatasetConfig {
                url: dataset_url,
                max_size,
                user_agent: format!("Ladle/{}", env!("CARGO_PKG_VERSION")),
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                max_request_body_size,
            },
            pagination: PaginationConfig {
                page_size,
                api_max_limit,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.pagination.page_size == 0 {
            return Err(Error::Config("Page size must be non-zero".to_string()));
        }

        if self.pagination.api_max_limit == 0 {
            return Err(Error::Config("API limit must be non-zero".to_string()));
        }

        crate::utils::validation::validate_dataset_url(&self.dataset.url)?;

        Ok(())
    }
}
