use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropCalError {
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("No planting season for {crop} in the {hemisphere} hemisphere")]
    UnsupportedRegion { crop: String, hemisphere: String },

    #[error("Invalid area: {0} (must be a positive number of hectares)")]
    InvalidArea(f64),

    #[error("Invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),
}

impl From<config::ConfigError> for CropCalError {
    fn from(e: config::ConfigError) -> Self {
        CropCalError::Config(e.to_string())
    }
}

impl CropCalError {
    /// Errors caused by the request itself rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CropCalError::UnknownCrop(_)
                | CropCalError::UnsupportedRegion { .. }
                | CropCalError::InvalidArea(_)
                | CropCalError::InvalidLocation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CropCalError>;
