pub mod assembler;
pub mod data;
pub mod settings;

pub use assembler::{assemble_chart, ChartEngine};
pub use data::{CelestialPoint, Chart};
pub use settings::ChartSettings;
