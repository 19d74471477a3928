use thiserror::Error;

/// A precondition of a curve operation was not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("position {index} is out of range for a curve of {len} control points")]
    PositionOutOfRange { index: usize, len: usize },

    #[error("control point {index} has no successor to form a section with")]
    NoSuccessor { index: usize },

    #[error("axis {axis} is out of range for a coordinate of dimension {dimension}")]
    AxisOutOfRange { axis: usize, dimension: usize },
}

pub type Result<T> = std::result::Result<T, CurveError>;

/// Checks that `axis` is a valid component index of the coordinate type `C`.
pub(crate) fn check_axis<C: crate::math::Coordinate>(axis: usize) -> Result<()> {
    if axis < C::DIMENSION {
        Ok(())
    } else {
        Err(CurveError::AxisOutOfRange {
            axis,
            dimension: C::DIMENSION,
        })
    }
}
