//! Term-structure interpolation across tenor horizons
//!
//! Each quote field of a tenor grid is interpolated independently over the
//! known (months, value) pairs. Two tiers are available:
//!
//! - **Cubic**: natural cubic spline, used when enough knots exist
//! - **Linear**: piecewise linear, used below the cubic threshold or when the
//!   spline cannot be built or evaluated
//!
//! Both tiers extrapolate from their end segments. The tier actually used is
//! returned with every estimate so callers can see when the fallback kicked in.

pub mod interp;
pub mod linear;
pub mod spline;
pub mod types;

pub use interp::*;
pub use linear::*;
pub use spline::*;
pub use types::*;
