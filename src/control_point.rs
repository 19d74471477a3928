use crate::math::Coordinate;

/// A point the curve passes through, with the handles shaping how the curve
/// enters and leaves it.
///
/// Both handles are absolute coordinates, not offsets from the position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint<C> {
    /// The point the curve passes through.
    position: C,
    /// The handle giving the direction of the curve before this point.
    input_direction: C,
    /// The handle giving the direction of the curve after this point.
    output_direction: C,
}

impl<C: Coordinate> ControlPoint<C> {
    /// Creates a control point with explicit handles.
    ///
    /// No validation is done on the handles.
    pub fn new(position: C, input_direction: C, output_direction: C) -> Self {
        Self {
            position,
            input_direction,
            output_direction,
        }
    }

    /// Creates a control point whose handles both sit on the position,
    /// so the curve has a zero tangent at this point.
    pub fn from_position(position: C) -> Self {
        Self::new(position, position, position)
    }

    /// Creates a control point from handles given as offsets relative to the position.
    ///
    /// # Parameters
    /// * `position` - The point the curve passes through
    /// * `incoming` - The tangent entering the point; the input handle is placed at `position - incoming`
    /// * `outgoing` - The tangent leaving the point; the output handle is placed at `position + outgoing`
    pub fn with_tangents(position: C, incoming: C, outgoing: C) -> Self {
        let input_direction =
            C::from_components(|axis| position.component(axis) - incoming.component(axis));
        let output_direction =
            C::from_components(|axis| position.component(axis) + outgoing.component(axis));
        Self::new(position, input_direction, output_direction)
    }

    /// The point the curve passes through.
    pub fn position(&self) -> C {
        self.position
    }

    /// The handle giving the direction of the curve before this point.
    pub fn input_direction(&self) -> C {
        self.input_direction
    }

    /// The handle giving the direction of the curve after this point.
    pub fn output_direction(&self) -> C {
        self.output_direction
    }
}

impl<C: Coordinate> Default for ControlPoint<C> {
    fn default() -> Self {
        Self::from_position(C::origin())
    }
}

impl<C: Coordinate> From<C> for ControlPoint<C> {
    fn from(position: C) -> Self {
        Self::from_position(position)
    }
}
