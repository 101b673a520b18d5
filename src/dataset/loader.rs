use crate::dataset::Recipe;
use crate::error::{Error, Result};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// HTTP loader for the recipe dataset, with retry logic for transient
/// transport failures.
pub struct Loader {
    client: Client,
    url: String,
    max_retries: u32,
    initial_backoff: Duration,
    max_size: usize,
}

/// A fetched and parsed dataset payload.
#[derive(Debug)]
pub struct FetchedDataset {
    pub recipes: Vec<Recipe>,
    /// SHA-256 of the raw payload, hex-encoded.
    pub fingerprint: String,
    pub byte_len: usize,
}

impl Loader {
    pub fn new(url: String, user_agent: String, max_size: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            url,
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_size,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the dataset, retrying transient transport failures
    /// with exponential backoff. HTTP error statuses are not retried.
    pub async fn fetch(&self) -> Result<FetchedDataset> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match self.fetch_once().await {
                Ok(result) => return Ok(result),
                Err(e) if retries < self.max_retries && Self::is_retryable(&e) => {
                    retries += 1;
                    warn!(
                        "Dataset fetch failed (attempt {}/{}): {}. Retrying in {:?}",
                        retries, self.max_retries, e, backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2; // Exponential backoff
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<FetchedDataset> {
        debug!("Fetching dataset: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Dataset(format!(
                "dataset request returned HTTP {}",
                response.status()
            )));
        }

        // Check content length before reading the body
        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size as u64 {
                return Err(Error::Validation(format!(
                    "Dataset size {} exceeds maximum {}",
                    content_length, self.max_size
                )));
            }
        }

        let bytes = response.bytes().await?;

        if bytes.len() > self.max_size {
            return Err(Error::Validation(format!(
                "Dataset size {} exceeds maximum {}",
                bytes.len(),
                self.max_size
            )));
        }

        let fingerprint = format!("{:x}", Sha256::digest(&bytes));
        let byte_len = bytes.len();

        let recipes: Vec<Recipe> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Dataset(format!("dataset is not a valid recipe array: {e}")))?;

        debug!(
            "Fetched {} recipes ({} bytes, sha256 {})",
            recipes.len(),
            byte_len,
            fingerprint
        );

        Ok(FetchedDataset {
            recipes,
            fingerprint,
            byte_len,
        })
    }

    fn is_retryable(error: &Error) -> bool {
        match error {
            Error::Http(e) => {
                // Retry on network errors, timeouts, interrupted requests
                e.is_timeout() || e.is_connect() || e.is_request()
            }
            _ => false,
        }
    }
}
