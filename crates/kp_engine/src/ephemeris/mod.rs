#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod fixed;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use fixed::{BodyLongitudes, FixedEphemeris};
pub use types::{Ephemeris, GeoLocation, HouseCusps, HouseSystem, NodeKind};
