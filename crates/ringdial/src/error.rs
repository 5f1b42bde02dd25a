use thiserror::Error;

/// Rejected slider construction input. Nothing is created when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("step {step} does not evenly divide the range {min}..{max}")]
    UnevenStep { min: f64, max: f64, step: f64 },
    #[error("max value {max} must be greater than min value {min}")]
    EmptyRange { min: f64, max: f64 },
    #[error("{steps} steps is more than the {limit} a dial can show")]
    TooManySteps { steps: f64, limit: usize },
    #[error("radius {radius} leaves no room for a ring {width} wide")]
    RadiusTooSmall { radius: f64, width: f64 },
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}
