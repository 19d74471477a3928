//! Mathematical structs and functions.

pub use coordinate::Coordinate;
pub use cubic::CubicBezier1d;

mod coordinate;
mod cubic;
