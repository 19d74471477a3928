//! Piecewise cubic Bézier curves over generic coordinate types.
//!
//! A [Curve] is a sequence of [ControlPoint]s. Each control point carries a
//! position and two absolute handles: the input handle shapes how the curve
//! enters the point, the output handle how it leaves. Every pair of consecutive
//! control points forms a [Section], a cubic Bézier segment that can be sampled
//! for its position and derivative.
//!
//! Curves are generic over any [math::Coordinate]: `cgmath` points and vectors,
//! fixed-size arrays, or `(time, value)` pairs for animation curves.
//!
//! ```
//! use bezier_path::{ControlPoint, Curve};
//!
//! let mut curve: Curve<(f64, f64)> = Curve::new();
//! curve.push_back(ControlPoint::from((0.0, 0.0)));
//! curve.push_back(ControlPoint::from((1.0, 1.0)));
//!
//! let ys = curve.get_y_at(0.5);
//! assert_eq!(ys.len(), 1);
//! assert!((ys[0] - 0.5).abs() < 1e-9);
//! ```
//!
//! Misuse such as asking for the section after the last control point, or
//! inserting past the end of the curve, is reported with a [CurveError].

pub use cgmath;
pub use control_point::ControlPoint;
pub use curve::Curve;
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use error::{CurveError, Result};
pub use section::Section;
pub use solver::SolverOptions;
pub use util::Interval;

mod control_point;
mod curve;
mod debug;
mod error;
pub mod math;
mod section;
mod solver;
mod util;
