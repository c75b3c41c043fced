use chrono::{Duration, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ensure_finite, ValidationError};
use crate::glucose::config::GeneratorConfig;
use crate::log_debug;

const ENABLE_LOGS: bool = true;

/// Position of a sample within the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseSeriesPoint {
    pub index: usize,
    pub hour_of_day: f64,
}

impl GlucoseSeriesPoint {
    /// Wall-clock time of the sample, counting from midnight.
    pub fn time_of_day(&self) -> NaiveTime {
        let seconds = (self.hour_of_day * 3600.0).round() as i64;
        NaiveTime::default() + Duration::seconds(seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseSample {
    pub point: GlucoseSeriesPoint,
    pub value: u16,
}

/// Synthetic CGM day built from a single baseline reading.
///
/// Each sample is the baseline plus a circadian sine, a meal spike inside the
/// breakfast/lunch/dinner windows and uniform noise, clamped to the
/// physiological range and rounded. The random source is injected so a seeded
/// generator reproduces the same day exactly.
pub struct GlucoseSeriesGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl GlucoseSeriesGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> GlucoseSeriesGenerator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Full day of rounded samples for `base_glucose`.
    pub fn generate(&mut self, base_glucose: f64) -> Result<Vec<u16>, ValidationError> {
        let sequence: Vec<u16> = self.samples(base_glucose)?.map(|s| s.value).collect();
        log_debug!(
            "Generated {} glucose samples from baseline {}",
            sequence.len(),
            base_glucose
        );
        Ok(sequence)
    }

    /// Lazily walk the day, yielding each sample with its position.
    pub fn samples(&mut self, base_glucose: f64) -> Result<GlucoseSamples<'_, R>, ValidationError> {
        let base_glucose = ensure_finite("base_glucose", base_glucose)?;
        Ok(GlucoseSamples {
            generator: self,
            base_glucose,
            index: 0,
        })
    }

    fn sample_at(&mut self, index: usize, base_glucose: f64) -> GlucoseSample {
        let config = &self.config;
        let hour = config.hour_of_day(index);

        let mut glucose = base_glucose;
        glucose += config.circadian_amplitude * ((hour - config.circadian_phase_hour) * PI / 12.0).sin();

        if config.in_meal_window(hour) {
            glucose += config.meal_spike_base + self.rng.gen::<f64>() * config.meal_spike_range;
        }

        glucose += (self.rng.gen::<f64>() - 0.5) * (2.0 * self.config.noise_amplitude);

        let value = glucose
            .clamp(self.config.min_glucose, self.config.max_glucose)
            .round() as u16;

        GlucoseSample {
            point: GlucoseSeriesPoint {
                index,
                hour_of_day: hour,
            },
            value,
        }
    }
}

/// Iterator over one generated day.
pub struct GlucoseSamples<'a, R: Rng> {
    generator: &'a mut GlucoseSeriesGenerator<R>,
    base_glucose: f64,
    index: usize,
}

impl<R: Rng> Iterator for GlucoseSamples<'_, R> {
    type Item = GlucoseSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.generator.config.sample_count {
            return None;
        }
        let sample = self.generator.sample_at(self.index, self.base_glucose);
        self.index += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.config.sample_count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for GlucoseSamples<'_, R> {}
