//! Scalar cubic Bézier polynomials.

use arrayvec::ArrayVec;
use cgmath::num_traits::Float;
use itertools::Itertools;
use log::trace;

use crate::util::Interval;
use crate::SolverOptions;

/// A cubic Bézier polynomial on a single axis.
///
/// `B(t) = (1-t)³·p0 + 3(1-t)²t·c0 + 3(1-t)t²·c1 + t³·p1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier1d<T> {
    points: [T; 4],
}

impl<T: Float> CubicBezier1d<T> {
    /// Creates the polynomial from its end points `p0`, `p1` and its handles `c0`, `c1`.
    pub const fn new(p0: T, c0: T, c1: T, p1: T) -> Self {
        Self {
            points: [p0, c0, c1, p1],
        }
    }

    /// The polynomial's end points and handles, in curve order.
    pub fn points(&self) -> [T; 4] {
        self.points
    }

    /// Samples the polynomial at `t`. Values of `t` outside of `[0, 1]` extrapolate.
    pub fn y(&self, t: T) -> T {
        let [p0, c0, c1, p1] = self.points;
        let three = Self::constant(3.0);
        let t1 = T::one() - t;
        t1 * t1 * t1 * p0 + three * t1 * t1 * t * c0 + three * t1 * t * t * c1 + t * t * t * p1
    }

    /// Samples the derivative of the polynomial with respect to `t`.
    pub fn dy(&self, t: T) -> T {
        let [p0, c0, c1, p1] = self.points;
        let three = Self::constant(3.0);
        let six = Self::constant(6.0);
        let t1 = T::one() - t;
        three * t1 * t1 * (c0 - p0) + six * t1 * t * (c1 - c0) + three * t * t * (p1 - c1)
    }

    pub fn y_and_dy(&self, t: T) -> (T, T) {
        (self.y(t), self.dy(t))
    }

    /// The values of `t` strictly inside `(0, 1)` where the derivative changes sign
    /// or touches zero, in increasing order.
    pub fn critical_points(&self) -> ArrayVec<T, 2> {
        let [p0, c0, c1, p1] = self.points;
        let (d0, d1, d2) = (c0 - p0, c1 - c0, p1 - c1);

        // dB/dt = 3 * (a*t^2 + b*t + c)
        let a = d0 - Self::constant(2.0) * d1 + d2;
        let b = Self::constant(2.0) * (d1 - d0);
        let c = d0;

        let mut roots = ArrayVec::<T, 2>::new();
        if a == T::zero() {
            if b != T::zero() {
                roots.push(-c / b);
            }
        } else {
            let disc = b * b - Self::constant(4.0) * a * c;
            if disc == T::zero() {
                roots.push(-b / (Self::constant(2.0) * a));
            } else if disc > T::zero() {
                let q = Self::constant(-0.5) * (b + b.signum() * disc.sqrt());
                roots.push(q / a);
                if q != T::zero() {
                    roots.push(c / q);
                }
            }
        }

        let mut roots = roots
            .into_iter()
            .filter(|t| *t > T::zero() && *t < T::one())
            .collect::<ArrayVec<T, 2>>();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        roots.into_iter().dedup().collect()
    }

    /// Splits `[0, 1]` into the sub-intervals on which the polynomial is monotonic.
    pub fn monotonic_intervals(&self) -> ArrayVec<Interval<T>, 3> {
        std::iter::once(T::zero())
            .chain(self.critical_points())
            .chain(std::iter::once(T::one()))
            .tuple_windows()
            .map(|(min, max)| Interval::new(min, max))
            .collect()
    }

    /// The range of values taken by the polynomial for `t` in `[0, 1]`.
    pub fn range(&self) -> Interval<T> {
        let [p0, _, _, p1] = self.points;
        self.critical_points()
            .into_iter()
            .map(|t| self.y(t))
            .fold(Interval::new(p0, p0).expanded_to(p1), |range, y| {
                range.expanded_to(y)
            })
    }

    /// Finds every `t` in `[0, 1]` where the polynomial equals `value`.
    ///
    /// Each monotonic sub-interval holds at most one root. Sub-intervals whose
    /// search does not converge within the iteration cap are skipped.
    pub fn solve(&self, value: T, options: &SolverOptions) -> ArrayVec<T, 3> {
        let tolerance = self.tolerance(options.tolerance);
        let mut roots = ArrayVec::<T, 3>::new();
        for interval in self.monotonic_intervals() {
            match self.solve_monotonic(value, interval, tolerance, options.max_iterations) {
                Solution::Root(t) => {
                    // A root on a breakpoint is found by both neighbouring intervals
                    let duplicate = roots
                        .last()
                        .map_or(false, |&last| (t - last).abs() <= Self::parameter_epsilon());
                    if !duplicate {
                        roots.push(t);
                    }
                }
                Solution::NotBracketed => {}
                Solution::NotConverged(t) => {
                    log::debug!(
                        "root search for {:?} in [{:?}, {:?}] did not converge, dropping t = {:?}",
                        value.to_f64(),
                        interval.min.to_f64(),
                        interval.max.to_f64(),
                        t.to_f64()
                    );
                }
            }
        }
        roots
    }

    /// Searches for `value` on an interval where the polynomial is monotonic,
    /// with Newton's method falling back to bisection whenever a step leaves the bracket.
    fn solve_monotonic(
        &self,
        value: T,
        interval: Interval<T>,
        tolerance: T,
        max_iterations: usize,
    ) -> Solution<T> {
        let Interval { mut min, mut max } = interval;
        let f_min = self.y(min) - value;
        let f_max = self.y(max) - value;

        if f_min.is_nan() || f_max.is_nan() {
            return Solution::NotBracketed;
        }
        if f_min == T::zero() {
            return Solution::Root(min);
        }
        if f_max == T::zero() {
            return Solution::Root(max);
        }
        if f_min.signum() == f_max.signum() {
            // `value` can still be touched at an end, within rounding
            let (end, residual) = if f_min.abs() <= f_max.abs() {
                (min, f_min)
            } else {
                (max, f_max)
            };
            return if residual.abs() <= tolerance {
                Solution::Root(end)
            } else {
                Solution::NotBracketed
            };
        }

        // Initial guess by linear interpolation between the bracket ends
        let mut t = Interval::new(min, max).lerp(Interval::new(f_min, f_max).inv_lerp(T::zero()));
        for _ in 0..max_iterations {
            let (y, dy) = self.y_and_dy(t);
            let error = y - value;
            trace!("t = {:?}, error = {:?}", t.to_f64(), error.to_f64());

            if error.abs() <= tolerance {
                return Solution::Root(t);
            }

            if error.signum() == f_min.signum() {
                min = t;
            } else {
                max = t;
            }
            if max - min <= Self::parameter_epsilon() {
                return Solution::Root(Interval::new(min, max).midpoint());
            }

            let newton = t - error / dy;
            t = if newton > min && newton < max {
                newton
            } else {
                Interval::new(min, max).midpoint()
            };
        }

        Solution::NotConverged(t)
    }

    /// Scales a relative tolerance to the magnitude of the polynomial's values.
    fn tolerance(&self, relative: f64) -> T {
        let magnitude = self.points.iter().fold(T::zero(), |acc, p| acc.max(p.abs()));
        T::from(relative).unwrap_or_else(T::epsilon) * magnitude
    }

    fn parameter_epsilon() -> T {
        T::epsilon() * Self::constant(4.0)
    }

    #[inline(always)]
    fn constant(x: f64) -> T {
        T::from(x).unwrap_or_else(T::nan)
    }
}

/// The outcome of a root search on a single monotonic interval.
enum Solution<T> {
    Root(T),
    NotBracketed,
    NotConverged(T),
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    #[test]
    pub fn end_points_are_exact() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..100 {
            let [p0, c0, c1, p1] = [(); 4].map(|_| rng.gen_range(-100.0f64..100.0));
            let cubic = CubicBezier1d::<f64>::new(p0, c0, c1, p1);
            assert_eq!(cubic.y(0.0), p0);
            assert_eq!(cubic.y(1.0), p1);
            assert_approx_eq!(cubic.dy(0.0), 3.0 * (c0 - p0), 1e-9);
            assert_approx_eq!(cubic.dy(1.0), 3.0 * (p1 - c1), 1e-9);
        }
    }

    #[test]
    pub fn straight_lines() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..100 {
            let y1: f64 = rng.gen_range(-100.0..100.0);
            let y2: f64 = rng.gen_range(-100.0..100.0);
            let w = y2 - y1;
            let cubic = CubicBezier1d::<f64>::new(y1, y1 + w / 3.0, y1 + 2.0 * w / 3.0, y2);
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                assert_approx_eq!(cubic.y(t), y1 + t * w, 1e-9);
                assert_approx_eq!(cubic.dy(t), w, 1e-9);
            }
            assert!(cubic.critical_points().is_empty());
        }
    }

    #[test]
    pub fn extrapolates_outside_unit_interval() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 1.0, 2.0, 3.0);
        assert_approx_eq!(cubic.y(2.0), 6.0);
        assert_approx_eq!(cubic.y(-1.0), -3.0);
    }

    #[test]
    pub fn critical_points_of_hill() {
        // Rises then falls back, with a single maximum at t = 0.5
        let cubic = CubicBezier1d::<f64>::new(0.0, 1.0, 1.0, 0.0);
        let critical = cubic.critical_points();
        assert_eq!(critical.len(), 1);
        assert_approx_eq!(critical[0], 0.5);
        assert_approx_eq!(cubic.range().max, 0.75);
        assert_eq!(cubic.range().min, 0.0);

        let intervals = cubic.monotonic_intervals();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].min, 0.0);
        assert_eq!(intervals[1].max, 1.0);
    }

    #[test]
    pub fn critical_points_of_s_curve() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 2.0, -1.0, 1.0);
        let critical = cubic.critical_points();
        assert_eq!(critical.len(), 2);
        assert!(critical[0] < critical[1]);
        for t in critical {
            assert_approx_eq!(cubic.dy(t), 0.0, 1e-9);
        }
        assert_eq!(cubic.monotonic_intervals().len(), 3);
    }

    #[test]
    pub fn solve_hill() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 1.0, 1.0, 0.0);
        let roots = cubic.solve(0.5, &SolverOptions::default());
        assert_eq!(roots.len(), 2);
        assert!(roots[0] < 0.5 && roots[1] > 0.5);
        for t in roots {
            assert_approx_eq!(cubic.y(t), 0.5, 1e-8);
        }
    }

    #[test]
    pub fn solve_at_extremum_reports_once() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 1.0, 1.0, 0.0);
        let roots = cubic.solve(0.75, &SolverOptions::default());
        assert_eq!(roots.len(), 1);
        assert_approx_eq!(roots[0], 0.5, 1e-6);
    }

    #[test]
    pub fn solve_out_of_range() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 1.0, 1.0, 0.0);
        assert!(cubic.solve(0.8, &SolverOptions::default()).is_empty());
        assert!(cubic.solve(-0.1, &SolverOptions::default()).is_empty());
    }

    #[test]
    pub fn solve_random_monotonic() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..100 {
            let p0: f64 = rng.gen_range(-100.0..0.0);
            let p1: f64 = rng.gen_range(1.0..100.0);
            let c0 = rng.gen_range(p0..p1);
            let c1 = rng.gen_range(c0..p1);
            let cubic = CubicBezier1d::<f64>::new(p0, c0, c1, p1);
            let value = rng.gen_range(p0..p1);
            let roots = cubic.solve(value, &SolverOptions::default());
            assert_eq!(roots.len(), 1);
            assert_approx_eq!(cubic.y(roots[0]), value, 1e-6);
        }
    }

    #[test]
    pub fn solve_is_scale_invariant() {
        for scale in [1e-12, 1e-9, 1e-6, 1.0, 1e3, 1e8, 1e12] {
            // Linear ramp from 0 to `scale`
            let cubic = CubicBezier1d::<f64>::new(0.0, scale / 3.0, 2.0 * scale / 3.0, scale);
            for fraction in [0.1, 0.25, 0.5, 0.9] {
                let roots = cubic.solve(fraction * scale, &SolverOptions::default());
                assert_eq!(roots.len(), 1);
                assert_approx_eq!(roots[0], fraction, 1e-6);
            }
        }
    }

    #[test]
    pub fn small_values_are_searched_inside_the_bracket() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 1e-9 / 3.0, 2e-9 / 3.0, 1e-9);
        let roots = cubic.solve(0.5e-9, &SolverOptions::default());
        assert_eq!(roots.len(), 1);
        assert_approx_eq!(roots[0], 0.5, 1e-6);
    }

    #[test]
    pub fn non_convergence_is_skipped() {
        let cubic = CubicBezier1d::<f64>::new(0.0, 0.9, 0.1, 1.0);
        let options = SolverOptions::default().with_max_iterations(0);
        assert!(cubic.solve(0.3, &options).is_empty());
    }
}
