pub mod calculations;
pub mod composer;
pub mod harvest;
pub mod resources;
pub mod rules;
pub mod season;
pub mod suitability;
pub mod telemetry_sync;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use composer::CalendarComposer;
pub use rules::RulesEngine;
pub use telemetry_sync::TelemetrySyncService;
