use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Satellite,
    OpenWeatherMap,
    Manual,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Satellite => "Satellite",
            DataSource::OpenWeatherMap => "OpenWeatherMap",
            DataSource::Manual => "Manual",
            DataSource::Fallback => "Fallback",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VegetationIndex {
    pub ndvi: f64,
    #[serde(default)]
    pub evi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMoisture {
    pub percent: f64,
    pub status: String,
}

impl SoilMoisture {
    pub fn new(percent: f64) -> Self {
        Self {
            percent,
            status: moisture_status(percent).to_string(),
        }
    }
}

/// Coarse label for a volumetric soil moisture percentage.
pub fn moisture_status(percent: f64) -> &'static str {
    if percent < 20.0 {
        "Dry"
    } else if percent < 40.0 {
        "Adequate"
    } else if percent < 70.0 {
        "Moist"
    } else {
        "Saturated"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current_c: f64,
    pub min_c: f64,
    pub max_c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub last_7_days_mm: f64,
    pub last_30_days_mm: f64,
}

/// Point-in-time environmental reading for a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub source: DataSource,
    pub vegetation: VegetationIndex,
    pub soil_moisture: SoilMoisture,
    pub temperature: Temperature,
    pub precipitation: Precipitation,
    pub humidity_percent: f64,
    pub cloud_cover_percent: f64,
    /// Fields filled with neutral values because the provider could not supply them.
    #[serde(default)]
    pub defaulted_fields: Vec<String>,
}

impl TelemetrySnapshot {
    /// Neutral snapshot used when no telemetry is available.
    pub fn fallback(location: Location) -> Self {
        Self {
            timestamp: Utc::now(),
            location,
            source: DataSource::Fallback,
            vegetation: VegetationIndex {
                ndvi: NEUTRAL_NDVI,
                evi: None,
            },
            soil_moisture: SoilMoisture::new(NEUTRAL_SOIL_MOISTURE),
            temperature: Temperature {
                current_c: NEUTRAL_TEMPERATURE_C,
                min_c: NEUTRAL_TEMPERATURE_C - 6.0,
                max_c: NEUTRAL_TEMPERATURE_C + 6.0,
            },
            precipitation: Precipitation {
                last_7_days_mm: 0.0,
                last_30_days_mm: 0.0,
            },
            humidity_percent: 60.0,
            cloud_cover_percent: 50.0,
            defaulted_fields: ALL_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    pub fn has_defaults(&self) -> bool {
        !self.defaulted_fields.is_empty()
    }
}

pub const NEUTRAL_NDVI: f64 = 0.4;
pub const NEUTRAL_SOIL_MOISTURE: f64 = 45.0;
pub const NEUTRAL_TEMPERATURE_C: f64 = 20.0;

const ALL_FIELDS: &[&str] = &[
    "vegetation",
    "soil_moisture",
    "temperature",
    "precipitation",
    "humidity",
    "cloud_cover",
];
