use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::error::{CropCalError, Result};
use crate::models::{Location, TelemetrySnapshot};
use std::path::Path;

/// Supplies the telemetry snapshot a calendar is generated against.
///
/// Fetch failures never abort generation: the service logs them and hands
/// back the neutral fallback snapshot, which the assessor reports as low
/// confidence.
pub struct TelemetrySyncService {
    openweathermap_client: Option<OpenWeatherMapClient>,
}

impl TelemetrySyncService {
    pub fn new(config: &Config) -> Self {
        let openweathermap_client = config.weather_provider().map(|c| {
            tracing::info!("OpenWeatherMap client configured for field telemetry");
            OpenWeatherMapClient::new(c.clone())
        });

        if openweathermap_client.is_none() {
            tracing::info!("OpenWeatherMap not configured - calendars use neutral telemetry");
        }

        Self {
            openweathermap_client,
        }
    }

    /// A service with no provider; every fetch returns the fallback snapshot.
    pub fn offline() -> Self {
        Self {
            openweathermap_client: None,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.openweathermap_client.is_some()
    }

    /// Current snapshot for a location, or the fallback when unavailable.
    pub async fn fetch(&self, location: Location) -> TelemetrySnapshot {
        let Some(ref client) = self.openweathermap_client else {
            tracing::warn!(%location, "no telemetry provider, using neutral snapshot");
            return TelemetrySnapshot::fallback(location);
        };

        match client.fetch_snapshot(location).await {
            Ok(snapshot) => {
                tracing::debug!(%location, "telemetry fetched from OpenWeatherMap");
                snapshot
            }
            Err(e) => {
                tracing::warn!(%location, "Failed to fetch telemetry: {}", e);
                TelemetrySnapshot::fallback(location)
            }
        }
    }

    /// Probe the provider. `None` when no provider is configured.
    pub async fn check_connection(&self, location: Location) -> Option<bool> {
        let client = self.openweathermap_client.as_ref()?;
        Some(client.test_connection(location).await.unwrap_or(false))
    }

    /// Read a snapshot recorded as JSON, e.g. from a field sensor export.
    pub fn load_snapshot(path: &Path) -> Result<TelemetrySnapshot> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: TelemetrySnapshot = serde_json::from_str(&content)?;
        if !snapshot.location.is_valid() {
            return Err(CropCalError::InvalidLocation {
                latitude: snapshot.location.latitude,
                longitude: snapshot.location.longitude,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::sample_telemetry;
    use crate::models::DataSource;

    #[tokio::test]
    async fn offline_service_returns_fallback() {
        let service = TelemetrySyncService::offline();
        assert!(!service.has_provider());

        let snapshot = service.fetch(Location::new(28.6, 77.2)).await;
        assert!(snapshot.is_fallback());
        assert_eq!(snapshot.location, Location::new(28.6, 77.2));
        assert!(service.check_connection(Location::new(0.0, 0.0)).await.is_none());
    }

    #[test]
    fn unusable_provider_config_means_no_client() {
        let config = Config::from_yaml_str("openweathermap:\n  api_key: abc\n  enabled: false\n").unwrap();
        assert!(!TelemetrySyncService::new(&config).has_provider());

        let config = Config::from_yaml_str("openweathermap:\n  api_key: abc\n").unwrap();
        assert!(TelemetrySyncService::new(&config).has_provider());
    }

    #[test]
    fn loads_snapshot_from_json() {
        let path = std::env::temp_dir().join(format!("cropcal-telemetry-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&sample_telemetry()).unwrap()).unwrap();

        let snapshot = TelemetrySyncService::load_snapshot(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(snapshot.source, DataSource::Manual);
        assert_eq!(snapshot.soil_moisture.percent, 50.0);
        assert!(!snapshot.has_defaults());
    }

    #[test]
    fn missing_snapshot_file_is_io_error() {
        let err = TelemetrySyncService::load_snapshot(Path::new("/nonexistent/cropcal.json")).unwrap_err();
        assert!(matches!(err, CropCalError::Io(_)));
    }
}
