//! Crop calendar generation.
//!
//! A [`CalendarComposer`] turns a crop's growth model, a field location and
//! area, and a telemetry snapshot into a dated, area-scaled calendar with a
//! suitability assessment and prioritized recommendations.

pub mod advisory;
pub mod catalog;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use catalog::CropRegistry;
pub use config::Config;
pub use error::{CropCalError, Result};
pub use logic::{CalendarComposer, TelemetrySyncService};
pub use models::{CalendarRequest, CropInfo, GeneratedCalendar, Location, TelemetrySnapshot};
