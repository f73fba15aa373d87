//! Breather viewer geometry: the parametric surface and the parameters that
//! select one sampled patch of it.

pub mod params;
pub mod surface;

pub use params::{ParamRange, SurfaceParameters};
pub use surface::{breather_point, BreatherSurface, Surface};
