//! qm-core: stable foundation for quenchmap.
//!
//! Contains:
//! - units (uom temperature conversions used by the kinetics)
//! - numeric (finiteness checks, rounding, table interpolation)
//! - buffer (growable row storage for curve builders)
//! - timing (wall-clock timers reported through tracing)
//! - error (shared error types)

pub mod buffer;
pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use buffer::DynamicBuffer;
pub use error::{QmError, QmResult};
pub use numeric::*;
pub use timing::Timer;
pub use units::*;
