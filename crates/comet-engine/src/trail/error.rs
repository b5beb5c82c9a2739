use thiserror::Error;

/// Rejected trail configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("life_time must be finite and > 0 (got {0})")]
    InvalidLifeTime(f32),

    #[error("width must be finite and >= 0 (got {0})")]
    InvalidWidth(f32),

    #[error("min_control_distance must be finite and > 0 (got {0})")]
    InvalidMinControlDistance(f32),

    #[error("color channels must be finite")]
    NonFiniteColor,
}
