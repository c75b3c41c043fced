/// Rejection raised at the numeric boundary before any computation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A numeric input was NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Clamp bounds are inverted or fall outside what a sample can hold.
    #[error("invalid glucose range: min {min} must not exceed max {max} and both must fit 0..=65535")]
    InvalidRange { min: f64, max: f64 },

    /// A glucose series with no samples was handed to feature extraction.
    #[error("glucose series is empty")]
    EmptySeries,
}

/// Ensure `value` is finite, tagging the failure with `field`.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}
