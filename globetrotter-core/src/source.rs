//! Country data source: REST Countries over HTTP with a JSON cache on disk.

use crate::config::Config;
use crate::country::Country;
use crate::error::GlobetrotterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};

const USER_AGENT: &str = "globetrotter/0.1";
const ACCEPT: &str = "application/json";

#[derive(Serialize, Deserialize, Debug)]
struct CachedCountries {
    data: Vec<Country>,
    cached_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct CountrySource {
    client: reqwest::Client,
    url: String,
    cache_file_path: PathBuf,
    max_age: Duration,
}

impl CountrySource {
    pub fn new(config: &Config) -> Result<Self, GlobetrotterError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(ACCEPT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        fs::create_dir_all(&config.cache_dir).map_err(|e| {
            GlobetrotterError::Cache(format!("Failed to create cache directory: {}", e))
        })?;

        Ok(CountrySource {
            client,
            url: config.countries_url.clone(),
            cache_file_path: config.countries_cache_path(),
            max_age: Duration::days(config.cache_max_age_days),
        })
    }

    /// All countries, from cache when fresh enough, otherwise from the API
    pub async fn load_countries(&self, force_update: bool) -> Result<Vec<Country>, GlobetrotterError> {
        if !force_update {
            if let Ok(cached) = self.load_from_cache() {
                if self.is_cache_valid(&cached) {
                    log::info!("CACHE HIT: Using cached countries from {}", cached.cached_at);
                    return Ok(cached.data);
                }
            }
        }

        log::info!("CACHE MISS: Fetching countries from {}", self.url);
        let countries = self.fetch_countries().await?;
        self.save_to_cache(&countries)?;
        Ok(countries)
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, GlobetrotterError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let countries: Vec<Country> = response.json().await?;
        log::debug!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    /// Raw bytes of a flag image
    pub async fn fetch_flag_bytes(&self, url: &str) -> Result<Vec<u8>, GlobetrotterError> {
        log::debug!("Fetching flag image: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn load_from_cache(&self) -> Result<CachedCountries, GlobetrotterError> {
        let content = fs::read_to_string(&self.cache_file_path)
            .map_err(|e| GlobetrotterError::Cache(format!("Failed to read cache file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| GlobetrotterError::Cache(format!("Failed to parse cache file: {}", e)))
    }

    fn save_to_cache(&self, countries: &[Country]) -> Result<(), GlobetrotterError> {
        let cached = CachedCountries {
            data: countries.to_vec(),
            cached_at: OffsetDateTime::now_utc(),
        };

        let content = serde_json::to_string(&cached)
            .map_err(|e| GlobetrotterError::Cache(format!("Failed to serialize cache data: {}", e)))?;

        fs::write(&self.cache_file_path, content)
            .map_err(|e| GlobetrotterError::Cache(format!("Failed to write cache file: {}", e)))?;

        log::info!("Saved countries to cache: {}", self.cache_file_path.display());
        Ok(())
    }

    fn is_cache_valid(&self, cached: &CachedCountries) -> bool {
        let age = OffsetDateTime::now_utc() - cached.cached_at;
        age < self.max_age
    }

    /// Timestamp and size of the cached list, if there is one
    pub fn get_cache_info(&self) -> Option<(OffsetDateTime, usize)> {
        self.load_from_cache()
            .ok()
            .map(|cached| (cached.cached_at, cached.data.len()))
    }

    pub fn clear_cache(&self) -> Result<(), GlobetrotterError> {
        if self.cache_file_path.exists() {
            fs::remove_file(&self.cache_file_path)
                .map_err(|e| GlobetrotterError::Cache(format!("Failed to remove cache file: {}", e)))?;
        }
        Ok(())
    }
}

/// Read a country list saved in the REST Countries array format
pub fn load_countries_file(path: &Path) -> Result<Vec<Country>, GlobetrotterError> {
    let content = fs::read_to_string(path)?;
    let countries: Vec<Country> = serde_json::from_str(&content)?;
    log::debug!("Loaded {} countries from {}", countries.len(), path.display());
    Ok(countries)
}
