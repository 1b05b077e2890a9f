use crate::config::OpenWeatherMapConfig;
use crate::error::{CropCalError, Result};
use crate::models::{
    DataSource, Location, Precipitation, SoilMoisture, TelemetrySnapshot, Temperature,
    VegetationIndex, NEUTRAL_NDVI, NEUTRAL_SOIL_MOISTURE,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Fields the current-weather endpoint cannot supply.
const UNSUPPLIED_FIELDS: &[&str] = &["vegetation", "soil_moisture", "precipitation"];

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    clouds: Option<OwmClouds>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64, // cloudiness percentage
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self, location: Location) -> String {
        format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, location.latitude, location.longitude, self.config.api_key
        )
    }

    /// Fetch current conditions and map them onto a telemetry snapshot.
    pub async fn fetch_snapshot(&self, location: Location) -> Result<TelemetrySnapshot> {
        let response = self
            .client
            .get(self.current_url(location))
            .send()
            .await
            .map_err(|e| CropCalError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropCalError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            CropCalError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(convert_response(owm_response, location))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, location: Location) -> Result<bool> {
        let response = self
            .client
            .get(self.current_url(location))
            .send()
            .await
            .map_err(|e| CropCalError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OwmCurrentResponse, location: Location) -> TelemetrySnapshot {
    let timestamp = DateTime::from_timestamp(response.dt, 0).unwrap_or_else(Utc::now);

    TelemetrySnapshot {
        timestamp,
        location,
        source: DataSource::OpenWeatherMap,
        vegetation: VegetationIndex {
            ndvi: NEUTRAL_NDVI,
            evi: None,
        },
        soil_moisture: SoilMoisture::new(NEUTRAL_SOIL_MOISTURE),
        temperature: Temperature {
            current_c: response.main.temp,
            min_c: response.main.temp_min,
            max_c: response.main.temp_max,
        },
        precipitation: Precipitation {
            last_7_days_mm: 0.0,
            last_30_days_mm: 0.0,
        },
        humidity_percent: response.main.humidity,
        cloud_cover_percent: response.clouds.map(|c| c.all).unwrap_or(0.0),
        defaulted_fields: UNSUPPLIED_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
}
