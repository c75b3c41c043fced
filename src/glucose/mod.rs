pub mod config;
pub mod features;
pub mod generator;

pub use config::{GeneratorConfig, MealWindow};
pub use features::extract_features;
pub use generator::{GlucoseSample, GlucoseSeriesGenerator, GlucoseSeriesPoint};
