//! Errors raised while building or reconfiguring a simulation
//!
//! The per-tick path never fails; everything here happens before the first
//! tick or between ticks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("viewport must have positive dimensions, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Column storage for `count` balls could not be reserved
    #[error("failed to allocate storage for {count} balls")]
    Allocation { count: usize },

    #[error("malformed configuration document: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to serialize simulation state: {0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_and_config_errors_read_differently() {
        let json_err = || serde_json::from_str::<u8>("x").unwrap_err();
        let serialize = SimError::Serialize(json_err()).to_string();
        let config = SimError::Config(json_err()).to_string();
        assert!(serialize.starts_with("failed to serialize simulation state"));
        assert!(config.starts_with("malformed configuration document"));
    }
}
