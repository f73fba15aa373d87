use crate::error::Result;

/// Validate the invariants of a value before it is handed to a consumer.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
