use cgmath::num_traits::ToPrimitive;
use log::{trace, warn};

use crate::control_point::ControlPoint;
use crate::debug::debug_root;
use crate::error::{check_axis, CurveError, Result};
use crate::math::Coordinate;
use crate::section::Section;
use crate::SolverOptions;

/// A piecewise cubic Bézier curve.
///
/// The curve is made of a sequence of control points, each of which has a
/// pair of handles telling how the curve enters and leaves the point.
/// Every two consecutive control points define a [Section].
///
/// Operations whose preconditions are not met return a [CurveError]
/// instead of producing an unspecified result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve<C> {
    /// The control points, in the order the curve goes through them.
    points: Vec<ControlPoint<C>>,
}

impl<C> Curve<C> {
    /// Creates an empty curve.
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// The number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a control point at the end of the curve.
    pub fn push_back(&mut self, point: ControlPoint<C>) {
        self.points.push(point);
    }

    /// Prepends a control point at the start of the curve.
    pub fn push_front(&mut self, point: ControlPoint<C>) {
        self.points.insert(0, point);
    }

    /// Inserts a control point before the one at `index`.
    ///
    /// An `index` equal to [Self::len] appends the point at the end.
    ///
    /// # Errors
    /// [CurveError::PositionOutOfRange] if `index` is greater than [Self::len].
    pub fn insert(&mut self, index: usize, point: ControlPoint<C>) -> Result<()> {
        if index > self.points.len() {
            return Err(CurveError::PositionOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        Ok(())
    }

    /// Gets the control point at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&ControlPoint<C>> {
        self.points.get(index)
    }

    /// The first control point of the curve.
    pub fn first(&self) -> Option<&ControlPoint<C>> {
        self.points.first()
    }

    /// The last control point of the curve.
    pub fn last(&self) -> Option<&ControlPoint<C>> {
        self.points.last()
    }

    /// Iterates over the control points in curve order.
    pub fn iter(&self) -> std::slice::Iter<'_, ControlPoint<C>> {
        self.points.iter()
    }

    /// Iterates mutably over the control points in curve order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ControlPoint<C>> {
        self.points.iter_mut()
    }
}

impl<C: Coordinate> Curve<C> {
    /// Gets the section going from the control point at `index` to its successor.
    ///
    /// # Errors
    /// * [CurveError::PositionOutOfRange] if there is no control point at `index`.
    /// * [CurveError::NoSuccessor] if the control point at `index` is the last one.
    pub fn get_section(&self, index: usize) -> Result<Section<'_, C>> {
        let len = self.points.len();
        if index >= len {
            return Err(CurveError::PositionOutOfRange { index, len });
        }
        if index + 1 == len {
            return Err(CurveError::NoSuccessor { index });
        }
        Ok(Section::new(index, &self.points[index], &self.points[index + 1]))
    }

    /// Splits the section starting at `index` in two at parameter `t`,
    /// inserting a new control point without changing the curve's shape.
    ///
    /// # Errors
    /// Same as [Self::get_section].
    pub fn subdivide(&mut self, index: usize, t: C::Value) -> Result<()> {
        let [origin, middle, end] = self.get_section(index)?.subdivide(t);
        self.points[index] = origin;
        self.points[index + 1] = end;
        self.points.insert(index + 1, middle);
        Ok(())
    }

    /// Iterates over the sections of the curve, in order.
    ///
    /// A curve with fewer than two control points has no sections.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_, C>> + '_ {
        self.points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Section::new(index, &pair[0], &pair[1]))
    }

    /// Finds the values of the second component of the curve wherever its
    /// first component equals `x`.
    ///
    /// The result is a sequence, not a de-duplicated set: values are ordered
    /// by section, then by position within the section, and a value of `x`
    /// reached exactly at a control point shared by two sections is reported
    /// once by each of them. The result is empty when `x` is outside
    /// of the curve's range, and for coordinates with a single component.
    pub fn get_y_at(&self, x: C::Value) -> Vec<C::Value> {
        self.get_values_at(0, 1, x, &SolverOptions::default())
            .unwrap_or_else(|err| {
                warn!("cannot evaluate the curve's y component: {}", err);
                Vec::new()
            })
    }

    /// Finds the values of the `dependent` component of the curve wherever
    /// its `independent` component equals `value`.
    ///
    /// See [Self::get_y_at] for the ordering of the results.
    ///
    /// # Errors
    /// [CurveError::AxisOutOfRange] if either axis is not a component of `C`.
    pub fn get_values_at(
        &self,
        independent: usize,
        dependent: usize,
        value: C::Value,
        options: &SolverOptions,
    ) -> Result<Vec<C::Value>> {
        check_axis::<C>(dependent)?;
        Ok(self
            .get_points_at(independent, value, options)?
            .into_iter()
            .map(|point| point.component(dependent))
            .collect())
    }

    /// Finds every point of the curve whose `axis` component equals `value`.
    ///
    /// # Errors
    /// [CurveError::AxisOutOfRange] if `axis` is not a component of `C`.
    pub fn get_points_at(
        &self,
        axis: usize,
        value: C::Value,
        options: &SolverOptions,
    ) -> Result<Vec<C>> {
        check_axis::<C>(axis)?;
        let mut points = vec![];
        for section in self.sections() {
            for t in section.roots(axis, value, options)? {
                trace!(
                    "section {} reaches {:?} on axis {} at t = {:?}",
                    section.index(),
                    ToPrimitive::to_f64(&value),
                    axis,
                    ToPrimitive::to_f64(&t)
                );
                let point = section.get_point_at(t);
                debug_root(section.index(), axis, value, t);
                points.push(point);
            }
        }
        Ok(points)
    }
}

impl<C> Default for Curve<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FromIterator<ControlPoint<C>> for Curve<C> {
    fn from_iter<I: IntoIterator<Item = ControlPoint<C>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<C> Extend<ControlPoint<C>> for Curve<C> {
    fn extend<I: IntoIterator<Item = ControlPoint<C>>>(&mut self, iter: I) {
        self.points.extend(iter)
    }
}

impl<C> IntoIterator for Curve<C> {
    type Item = ControlPoint<C>;
    type IntoIter = std::vec::IntoIter<ControlPoint<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, C> IntoIterator for &'a Curve<C> {
    type Item = &'a ControlPoint<C>;
    type IntoIter = std::slice::Iter<'a, ControlPoint<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<'a, C> IntoIterator for &'a mut Curve<C> {
    type Item = &'a mut ControlPoint<C>;
    type IntoIter = std::slice::IterMut<'a, ControlPoint<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter_mut()
    }
}
