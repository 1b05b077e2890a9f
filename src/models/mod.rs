pub mod calendar;
pub mod crop;
pub mod recommendation;
pub mod telemetry;

pub use calendar::*;
pub use crop::*;
pub use recommendation::*;
pub use telemetry::*;
