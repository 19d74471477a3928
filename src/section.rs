use smallvec::SmallVec;

use crate::control_point::ControlPoint;
use crate::error::{check_axis, Result};
use crate::math::{Coordinate, CubicBezier1d};
use crate::util::Interval;
use crate::SolverOptions;

/// The part of a [Curve](crate::Curve) between two consecutive control points.
///
/// A section is a cubic Bézier segment going from the origin's position,
/// pulled by the origin's output handle and the end's input handle,
/// to the end's position. It borrows both points from the curve and
/// is recomputed on every query.
#[derive(Clone, Copy, Debug)]
pub struct Section<'a, C> {
    /// The index of `origin` in the curve.
    index: usize,
    /// The point at the beginning of the section.
    origin: &'a ControlPoint<C>,
    /// The point at the end of the section.
    end: &'a ControlPoint<C>,
}

impl<'a, C: Coordinate> Section<'a, C> {
    /// Creates a section. `end` must be the successor of `origin`, which sits at `index`.
    pub(crate) fn new(index: usize, origin: &'a ControlPoint<C>, end: &'a ControlPoint<C>) -> Self {
        Self { index, origin, end }
    }

    /// The index of the section's origin within the curve.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The control point at the beginning of the section.
    pub fn origin(&self) -> &'a ControlPoint<C> {
        self.origin
    }

    /// The control point at the end of the section.
    pub fn end(&self) -> &'a ControlPoint<C> {
        self.end
    }

    /// Samples the section.
    ///
    /// `t` is expected in `[0, 1]`, with `0` giving the origin's position and
    /// `1` the end's position. Other values extrapolate the polynomial.
    pub fn get_point_at(&self, t: C::Value) -> C {
        C::from_components(|axis| self.polynomial(axis).y(t))
    }

    /// Samples the derivative of a single component of the section with respect to `t`.
    ///
    /// # Errors
    /// [CurveError::AxisOutOfRange](crate::CurveError::AxisOutOfRange) if `axis`
    /// is not a component of `C`.
    pub fn get_tangent_at(&self, t: C::Value, axis: usize) -> Result<C::Value> {
        check_axis::<C>(axis)?;
        Ok(self.polynomial(axis).dy(t))
    }

    /// Samples the derivative of every component of the section with respect to `t`.
    pub fn get_velocity_at(&self, t: C::Value) -> C {
        C::from_components(|axis| self.polynomial(axis).dy(t))
    }

    /// The cubic polynomial describing a single component of the section.
    pub fn axis_polynomial(&self, axis: usize) -> Result<CubicBezier1d<C::Value>> {
        check_axis::<C>(axis)?;
        Ok(self.polynomial(axis))
    }

    /// The range of values taken by a component over the section.
    pub fn axis_range(&self, axis: usize) -> Result<Interval<C::Value>> {
        Ok(self.axis_polynomial(axis)?.range())
    }

    /// Finds the parameters at which a component of the section equals `value`.
    ///
    /// The roots are in increasing order. There are at most three, one per
    /// interval on which the component is monotonic.
    pub fn roots(
        &self,
        axis: usize,
        value: C::Value,
        options: &SolverOptions,
    ) -> Result<SmallVec<[C::Value; 3]>> {
        let polynomial = self.axis_polynomial(axis)?;
        if !polynomial.range().contains(value) {
            return Ok(SmallVec::new());
        }
        Ok(polynomial.solve(value, options).into_iter().collect())
    }

    /// Splits the section at `t` with de Casteljau's algorithm.
    ///
    /// Returns the origin with a shortened output handle, the new control
    /// point at `t`, and the end with a shortened input handle. Both halves
    /// together trace the same shape as this section.
    pub fn subdivide(&self, t: C::Value) -> [ControlPoint<C>; 3] {
        let lerp = |a: C, b: C| {
            C::from_components(|axis| {
                let (a, b) = (a.component(axis), b.component(axis));
                a + t * (b - a)
            })
        };
        let p00 = self.origin.position();
        let p01 = self.origin.output_direction();
        let p02 = self.end.input_direction();
        let p03 = self.end.position();
        let p10 = lerp(p00, p01);
        let p11 = lerp(p01, p02);
        let p12 = lerp(p02, p03);
        let p20 = lerp(p10, p11);
        let p21 = lerp(p11, p12);
        let p30 = lerp(p20, p21);
        [
            ControlPoint::new(p00, self.origin.input_direction(), p10),
            ControlPoint::new(p30, p20, p21),
            ControlPoint::new(p03, p12, self.end.output_direction()),
        ]
    }

    #[inline(always)]
    fn polynomial(&self, axis: usize) -> CubicBezier1d<C::Value> {
        CubicBezier1d::new(
            self.origin.position().component(axis),
            self.origin.output_direction().component(axis),
            self.end.input_direction().component(axis),
            self.end.position().component(axis),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CurveError;
    use assert_approx_eq::assert_approx_eq;
    use cgmath::{Point2, Point3};
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut impl Rng) -> Point3<f64> {
        Point3::new(
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        )
    }

    #[test]
    fn end_points_are_interpolated() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..100 {
            let [a, b] = [(); 2].map(|_| {
                ControlPoint::new(
                    random_point(&mut rng),
                    random_point(&mut rng),
                    random_point(&mut rng),
                )
            });
            let section = Section::new(0, &a, &b);
            assert_eq!(section.get_point_at(0.0), a.position());
            assert_eq!(section.get_point_at(1.0), b.position());
        }
    }

    #[test]
    fn straight_line_is_linear() {
        let (p0, p1) = (Point2::new(1.0, -2.0), Point2::new(7.0, 4.0));
        let lerp = |t: f64| Point2::new(p0.x + t * (p1.x - p0.x), p0.y + t * (p1.y - p0.y));
        let a = ControlPoint::new(p0, p0, lerp(1.0 / 3.0));
        let b = ControlPoint::new(p1, lerp(2.0 / 3.0), p1);
        let section = Section::new(0, &a, &b);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let p = section.get_point_at(t);
            assert_approx_eq!(p.x, lerp(t).x, 1e-9);
            assert_approx_eq!(p.y, lerp(t).y, 1e-9);
            assert_approx_eq!(section.get_tangent_at(t, 0).unwrap(), 6.0, 1e-9);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let a: ControlPoint<(f64, f64)> = ControlPoint::new((0.0, 0.0), (-1.0, 0.0), (1.0, 2.0));
        let b: ControlPoint<(f64, f64)> = ControlPoint::new((3.0, 1.0), (2.0, -1.0), (4.0, 0.0));
        let first = Section::new(0, &a, &b);
        let second = Section::new(0, &a, &b);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_eq!(first.get_point_at(t), second.get_point_at(t));
            assert_eq!(first.get_velocity_at(t), second.get_velocity_at(t));
        }
    }

    #[test]
    fn tangent_matches_velocity() {
        let a: ControlPoint<(f64, f64)> = ControlPoint::new((0.0, 0.0), (0.0, 0.0), (1.0, 2.0));
        let b: ControlPoint<(f64, f64)> = ControlPoint::new((3.0, 1.0), (2.0, -1.0), (3.0, 1.0));
        let section = Section::new(0, &a, &b);
        let velocity = section.get_velocity_at(0.3);
        assert_eq!(section.get_tangent_at(0.3, 0), Ok(velocity.0));
        assert_eq!(section.get_tangent_at(0.3, 1), Ok(velocity.1));
        assert_eq!(section.get_velocity_at(0.0), (3.0, 6.0));
    }

    #[test]
    fn invalid_axis() {
        let a = ControlPoint::from((0.0, 0.0));
        let b = ControlPoint::from((1.0, 1.0));
        let section = Section::new(0, &a, &b);
        assert_eq!(
            section.get_tangent_at(0.5, 2),
            Err(CurveError::AxisOutOfRange {
                axis: 2,
                dimension: 2
            })
        );
        assert!(section.roots(5, 0.5, &SolverOptions::default()).is_err());
    }

    #[test]
    fn subdivided_halves_trace_the_section() {
        let a: ControlPoint<(f64, f64)> = ControlPoint::new((0.0, 0.0), (-1.0, 0.0), (1.0, 2.0));
        let b: ControlPoint<(f64, f64)> = ControlPoint::new((3.0, 1.0), (2.0, -1.0), (4.0, 0.0));
        let section = Section::new(0, &a, &b);
        let [first, middle, last] = section.subdivide(0.4);
        assert_eq!(first.input_direction(), a.input_direction());
        assert_eq!(last.output_direction(), b.output_direction());

        let left = Section::new(0, &first, &middle);
        let right = Section::new(1, &middle, &last);
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            let expected = section.get_point_at(0.4 * s);
            let actual = left.get_point_at(s);
            assert_approx_eq!(actual.0, expected.0, 1e-9);
            assert_approx_eq!(actual.1, expected.1, 1e-9);

            let expected = section.get_point_at(0.4 + 0.6 * s);
            let actual = right.get_point_at(s);
            assert_approx_eq!(actual.0, expected.0, 1e-9);
            assert_approx_eq!(actual.1, expected.1, 1e-9);
        }
    }

    #[test]
    fn roots_round_trip() {
        let a: ControlPoint<(f64, f64)> = ControlPoint::new((0.0, 0.0), (0.0, 0.0), (2.0, 3.0));
        let b: ControlPoint<(f64, f64)> = ControlPoint::new((1.0, 0.0), (-1.0, 3.0), (1.0, 0.0));
        let section = Section::new(0, &a, &b);
        let roots = section.roots(0, 0.5, &SolverOptions::default()).unwrap();
        assert!(!roots.is_empty());
        for t in roots {
            assert!((0.0..=1.0).contains(&t));
            assert_approx_eq!(section.get_point_at(t).0, 0.5, 1e-8);
        }
    }
}
