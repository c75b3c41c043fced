use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ValidationError};

/// An inclusive range of hours in which a meal spike is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealWindow {
    pub start_hour: f64,
    pub end_hour: f64,
}

impl MealWindow {
    pub const fn new(start_hour: f64, end_hour: f64) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: f64) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }
}

/// Shape parameters for the synthetic glucose day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Samples per series (one day at 15-minute resolution)
    pub sample_count: usize,
    pub interval_minutes: u32,

    /// Circadian sine: amplitude in mg/dL and the hour of the zero crossing
    /// leading into the daytime rise
    pub circadian_amplitude: f64,
    pub circadian_phase_hour: f64,

    /// Breakfast, lunch, dinner
    pub meal_windows: Vec<MealWindow>,
    pub meal_spike_base: f64,
    pub meal_spike_range: f64,

    /// Uniform noise spans [-noise_amplitude, noise_amplitude)
    pub noise_amplitude: f64,

    pub min_glucose: f64,
    pub max_glucose: f64,
}

impl GeneratorConfig {
    /// Hour of day for sample `index`, wrapped into [0, 24).
    pub fn hour_of_day(&self, index: usize) -> f64 {
        (index as f64 * (self.interval_minutes as f64 / 60.0)) % 24.0
    }

    pub fn in_meal_window(&self, hour: f64) -> bool {
        self.meal_windows.iter().any(|w| w.contains(hour))
    }

    /// Reject shapes that would produce NaN samples or an unusable clamp.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("circadian_amplitude", self.circadian_amplitude)?;
        ensure_finite("circadian_phase_hour", self.circadian_phase_hour)?;
        ensure_finite("meal_spike_base", self.meal_spike_base)?;
        ensure_finite("meal_spike_range", self.meal_spike_range)?;
        ensure_finite("noise_amplitude", self.noise_amplitude)?;
        let min = ensure_finite("min_glucose", self.min_glucose)?;
        let max = ensure_finite("max_glucose", self.max_glucose)?;
        for window in &self.meal_windows {
            ensure_finite("meal_window.start_hour", window.start_hour)?;
            ensure_finite("meal_window.end_hour", window.end_hour)?;
        }

        // Samples are stored as u16
        if min > max || min < 0.0 || max > u16::MAX as f64 {
            return Err(ValidationError::InvalidRange { min, max });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_count: 96,
            interval_minutes: 15,
            circadian_amplitude: 10.0,
            circadian_phase_hour: 6.0,
            meal_windows: vec![
                MealWindow::new(7.0, 9.0),
                MealWindow::new(12.0, 14.0),
                MealWindow::new(18.0, 20.0),
            ],
            meal_spike_base: 20.0,
            meal_spike_range: 30.0,
            noise_amplitude: 10.0,
            min_glucose: 70.0,
            max_glucose: 300.0,
        }
    }
}
