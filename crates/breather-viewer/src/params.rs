//! The parameter store: the single owner of the current generation
//! parameters.

use std::fmt;
use std::str::FromStr;

use breather_core::{BreatherError, Result, Validate};
use breather_geometry::SurfaceParameters;
use tracing::debug;

/// One editable field of [`SurfaceParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    ShapeCoefficient,
    UMin,
    UMax,
    VMin,
    VMax,
    USegments,
    VSegments,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::ShapeCoefficient,
        ParameterField::UMin,
        ParameterField::UMax,
        ParameterField::VMin,
        ParameterField::VMax,
        ParameterField::USegments,
        ParameterField::VSegments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParameterField::ShapeCoefficient => "a",
            ParameterField::UMin => "u-min",
            ParameterField::UMax => "u-max",
            ParameterField::VMin => "v-min",
            ParameterField::VMax => "v-max",
            ParameterField::USegments => "u-segments",
            ParameterField::VSegments => "v-segments",
        }
    }

    pub fn is_count(self) -> bool {
        matches!(self, ParameterField::USegments | ParameterField::VSegments)
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterField {
    type Err = BreatherError;

    fn from_str(s: &str) -> Result<Self> {
        ParameterField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| BreatherError::InvalidParameter(format!("unknown parameter '{s}'")))
    }
}

/// A typed value for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Float(f64),
    Count(usize),
}

/// Parse UI text for `field` into a typed value.
///
/// Floats accept any finite decimal; segment counts must be non-negative
/// integers (range checks happen when the value is applied).
pub fn parse_field(field: ParameterField, text: &str) -> Result<ParameterValue> {
    let text = text.trim();
    if field.is_count() {
        text.parse::<usize>()
            .map(ParameterValue::Count)
            .map_err(|e| BreatherError::InvalidParameter(format!("{field}: '{text}' ({e})")))
    } else {
        let value = text
            .parse::<f64>()
            .map_err(|e| BreatherError::InvalidParameter(format!("{field}: '{text}' ({e})")))?;
        if !value.is_finite() {
            return Err(BreatherError::InvalidParameter(format!(
                "{field}: '{text}' is not finite"
            )));
        }
        Ok(ParameterValue::Float(value))
    }
}

/// Holds the current [`SurfaceParameters`] and whether the mesh built from
/// them is stale.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    current: SurfaceParameters,
    defaults: SurfaceParameters,
    dirty: bool,
}

impl ParameterStore {
    /// A store starting at (and resetting to) the canonical defaults.
    pub fn new() -> Self {
        Self {
            current: SurfaceParameters::canonical(),
            defaults: SurfaceParameters::canonical(),
            dirty: true,
        }
    }

    /// A store starting at `initial`; resets still restore the canonical
    /// defaults.
    pub fn with_initial(initial: SurfaceParameters) -> Result<Self> {
        initial.validate()?;
        Ok(Self {
            current: initial,
            ..Self::new()
        })
    }

    pub fn current(&self) -> &SurfaceParameters {
        &self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replace one field. The whole tuple is validated; on failure the
    /// current parameters are left untouched.
    pub fn set(&mut self, field: ParameterField, value: ParameterValue) -> Result<()> {
        let mut candidate = self.current;
        match (field, value) {
            (ParameterField::ShapeCoefficient, ParameterValue::Float(x)) => {
                candidate.shape_coefficient = x
            }
            (ParameterField::UMin, ParameterValue::Float(x)) => candidate.u_range.min = x,
            (ParameterField::UMax, ParameterValue::Float(x)) => candidate.u_range.max = x,
            (ParameterField::VMin, ParameterValue::Float(x)) => candidate.v_range.min = x,
            (ParameterField::VMax, ParameterValue::Float(x)) => candidate.v_range.max = x,
            (ParameterField::USegments, ParameterValue::Count(n)) => candidate.u_segments = n,
            (ParameterField::VSegments, ParameterValue::Count(n)) => candidate.v_segments = n,
            (field, value) => {
                return Err(BreatherError::InvalidParameter(format!(
                    "{field} does not accept {value:?}"
                )))
            }
        }
        self.replace(candidate)
    }

    /// Replace the whole tuple after validating it.
    pub fn replace(&mut self, params: SurfaceParameters) -> Result<()> {
        if let Err(e) = params.validate() {
            debug!(error = %e, "rejected parameter edit");
            return Err(e);
        }
        if params != self.current {
            self.current = params;
            self.dirty = true;
        }
        Ok(())
    }

    /// Restore the canonical defaults and mark the mesh stale.
    pub fn reset_to_defaults(&mut self) {
        self.current = self.defaults;
        self.dirty = true;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
