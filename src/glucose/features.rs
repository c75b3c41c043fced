use crate::error::ValidationError;
use crate::glucose::config::GeneratorConfig;
use crate::scoring::GlucoseRealtimeFeatures;

const HYPERGLYCEMIA_THRESHOLD: f64 = 140.0;
/// Daytime window by whole hour, inclusive
const DAY_START_HOUR: f64 = 8.0;
const DAY_END_HOUR: f64 = 20.0;
/// Net change over 3 samples that counts as a rise
const RISE_THRESHOLD: f64 = 12.0;
const RISE_SPAN: usize = 3;
/// Sample-to-sample jump that flags a spike
const SPIKE_SLOPE_THRESHOLD: f64 = 15.0;
const MOMENT_EPSILON: f64 = 1e-8;

/// Aggregate a glucose day into the realtime feature block sent for scoring.
///
/// `config` supplies the sampling interval so each sample can be placed in the
/// day or night window. The sequence itself is carried through unchanged.
pub fn extract_features(
    sequence: &[u16],
    config: &GeneratorConfig,
) -> Result<GlucoseRealtimeFeatures, ValidationError> {
    if sequence.is_empty() {
        return Err(ValidationError::EmptySeries);
    }

    let values: Vec<f64> = sequence.iter().map(|&g| g as f64).collect();
    let n = values.len() as f64;

    let mean = mean(&values);
    let std = variance(&values, mean).sqrt();
    let cov = if mean != 0.0 { std / mean } else { 0.0 };

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let slopes: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let mean_slope = if slopes.is_empty() { 0.0 } else { self::mean(&slopes) };
    let max_slope = slopes.iter().copied().fold(0.0, f64::max);

    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;
    let skew = m3 / (std.powi(3) + MOMENT_EPSILON);
    let kurtosis = m4 / (std.powi(4) + MOMENT_EPSILON);

    let pct_above_140 = values.iter().filter(|&&v| v > HYPERGLYCEMIA_THRESHOLD).count() as f64 / n;

    let (day, night): (Vec<(usize, f64)>, Vec<(usize, f64)>) =
        values.iter().copied().enumerate().partition(|(i, _)| {
            let hour = config.hour_of_day(*i).floor();
            (DAY_START_HOUR..=DAY_END_HOUR).contains(&hour)
        });
    let window_mean = |window: &[(usize, f64)]| {
        if window.is_empty() {
            mean
        } else {
            window.iter().map(|(_, v)| v).sum::<f64>() / window.len() as f64
        }
    };
    let circadian_diff = (window_mean(&day) - window_mean(&night)).abs();

    let samp_entropy = if values.len() > 2 {
        variance(&diffs, self::mean(&diffs))
    } else {
        0.0
    };

    let mut rises: Vec<f64> = values
        .windows(RISE_SPAN + 1)
        .map(|w| w[RISE_SPAN] - w[0])
        .filter(|&rise| rise > RISE_THRESHOLD)
        .collect();
    rises.sort_by(|a, b| a.total_cmp(b));
    let median_rise = if rises.is_empty() { 0.0 } else { percentile(&rises, 0.5) };

    let spike_flags: Vec<bool> = slopes.iter().map(|&s| s > SPIKE_SLOPE_THRESHOLD).collect();
    let short_spikes = spike_flags.windows(2).filter(|w| w[0] && !w[1]).count() as u32;
    let sustained_spikes = spike_flags.windows(3).filter(|w| w.iter().all(|&f| f)).count() as u32;

    Ok(GlucoseRealtimeFeatures {
        mean_gluc_weak: mean,
        std_gluc: std,
        cov,
        iqr,
        mean_slope,
        max_slope,
        skew,
        kurtosis,
        pct_above_140,
        circadian_diff,
        samp_entropy,
        median_rise,
        short_spikes,
        sustained_spikes,
        glucose_sequence: sequence.to_vec(),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
fn variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Linear-interpolated percentile of an ascending, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}
