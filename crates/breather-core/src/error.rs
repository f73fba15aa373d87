use thiserror::Error;

#[derive(Debug, Error)]
pub enum BreatherError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Segment counts {u_segments}x{v_segments} exceed the representable index range")]
    SegmentOverflow { u_segments: usize, v_segments: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BreatherError {
    /// True for every rejection of user-supplied generation parameters,
    /// including segment counts that would overflow the index buffer.
    pub fn is_parameter_rejection(&self) -> bool {
        matches!(
            self,
            BreatherError::InvalidParameter(_) | BreatherError::SegmentOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BreatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_is_parameter_rejection() {
        let err = BreatherError::SegmentOverflow {
            u_segments: 1 << 20,
            v_segments: 1 << 20,
        };
        assert!(err.is_parameter_rejection());
        assert!(err.to_string().contains("1048576x1048576"));
    }

    #[test]
    fn test_io_is_not_parameter_rejection() {
        let err: BreatherError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_parameter_rejection());
    }
}
