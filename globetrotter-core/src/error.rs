use std::fmt;

#[derive(Debug)]
pub enum GlobetrotterError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Cache(String),
    Config(String),
}

impl fmt::Display for GlobetrotterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobetrotterError::Network(e) => write!(f, "Network error: {}", e),
            GlobetrotterError::Json(e) => write!(f, "JSON parsing error: {}", e),
            GlobetrotterError::Io(e) => write!(f, "IO error: {}", e),
            GlobetrotterError::Cache(e) => write!(f, "Cache error: {}", e),
            GlobetrotterError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for GlobetrotterError {}

impl From<reqwest::Error> for GlobetrotterError {
    fn from(err: reqwest::Error) -> Self {
        GlobetrotterError::Network(err)
    }
}

impl From<serde_json::Error> for GlobetrotterError {
    fn from(err: serde_json::Error) -> Self {
        GlobetrotterError::Json(err)
    }
}

impl From<std::io::Error> for GlobetrotterError {
    fn from(err: std::io::Error) -> Self {
        GlobetrotterError::Io(err)
    }
}
