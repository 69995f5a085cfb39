use crate::error::GlobetrotterError;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca3,capital,region,subregion,population,idd,flags";
const DEFAULT_CACHE_MAX_AGE_DAYS: i64 = 1;

const ENV_COUNTRIES_URL: &str = "GLOBETROTTER_COUNTRIES_URL";
const ENV_CACHE_DIR: &str = "GLOBETROTTER_CACHE_DIR";
const ENV_FAVORITES: &str = "GLOBETROTTER_FAVORITES";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub countries_url: String,
    pub cache_dir: PathBuf,
    pub favorites_path: PathBuf,
    pub cache_max_age_days: i64,
}

impl Config {
    /// Platform defaults with environment overrides applied
    pub fn load() -> Result<Self, GlobetrotterError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, GlobetrotterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_dir = match lookup(ENV_CACHE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => Self::project_dirs()?.cache_dir().to_path_buf(),
        };

        let favorites_path = match lookup(ENV_FAVORITES) {
            Some(path) => PathBuf::from(path),
            None => Self::project_dirs()?.data_dir().join("favorites.json"),
        };

        let countries_url = lookup(ENV_COUNTRIES_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string());

        Ok(Config {
            countries_url,
            cache_dir,
            favorites_path,
            cache_max_age_days: DEFAULT_CACHE_MAX_AGE_DAYS,
        })
    }

    fn project_dirs() -> Result<ProjectDirs, GlobetrotterError> {
        ProjectDirs::from("", "", "globetrotter").ok_or_else(|| {
            GlobetrotterError::Config("Could not determine application directories".to_string())
        })
    }

    pub fn countries_cache_path(&self) -> PathBuf {
        self.cache_dir.join("countries.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_COUNTRIES_URL, "http://localhost:8080/all"),
            (ENV_CACHE_DIR, "/tmp/globetrotter-cache"),
            (ENV_FAVORITES, "/tmp/favs.json"),
        ]);

        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.countries_url, "http://localhost:8080/all");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/globetrotter-cache"));
        assert_eq!(config.favorites_path, PathBuf::from("/tmp/favs.json"));
        assert_eq!(
            config.countries_cache_path(),
            PathBuf::from("/tmp/globetrotter-cache/countries.json")
        );
        assert_eq!(config.cache_max_age_days, 1);
    }

    #[test]
    fn test_blank_url_falls_back_to_default() {
        let config = Config::from_lookup(|key| match key {
            ENV_COUNTRIES_URL => Some("  ".to_string()),
            ENV_CACHE_DIR => Some("/tmp/c".to_string()),
            ENV_FAVORITES => Some("/tmp/f.json".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.countries_url, DEFAULT_COUNTRIES_URL);
    }
}
