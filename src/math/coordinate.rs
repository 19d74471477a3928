use cgmath::num_traits::{Float, Zero};
use cgmath::{BaseFloat, Point2, Point3, Vector2, Vector3};

/// A coordinate type that can be taken apart into, and rebuilt from, its
/// scalar components.
///
/// This is the only capability a [Curve](crate::Curve) needs from the space
/// it lives in. Any type with a fixed number of floating point components can
/// implement it: 2D and 3D points, plain arrays, or `(time, value)` pairs for
/// animation curves.
pub trait Coordinate: Copy {
    /// The type of a single component.
    type Value: Float;

    /// The number of components of the coordinate.
    const DIMENSION: usize;

    /// Gets the component on the given axis.
    ///
    /// `axis` must be less than [Self::DIMENSION].
    fn component(&self, axis: usize) -> Self::Value;

    /// Builds a coordinate by calling `f` once for every axis, in order.
    fn from_components(f: impl FnMut(usize) -> Self::Value) -> Self;

    /// The coordinate whose components are all zero.
    fn origin() -> Self {
        Self::from_components(|_| <Self::Value as Zero>::zero())
    }
}

macro_rules! impl_cgmath_coordinate {
    ($ty:ident, $dim:expr, $($axis:expr),+) => {
        impl<S: BaseFloat> Coordinate for $ty<S> {
            type Value = S;
            const DIMENSION: usize = $dim;

            #[inline(always)]
            fn component(&self, axis: usize) -> S {
                self[axis]
            }

            fn from_components(mut f: impl FnMut(usize) -> S) -> Self {
                $ty::new($(f($axis)),+)
            }
        }
    };
}

impl_cgmath_coordinate!(Point2, 2, 0, 1);
impl_cgmath_coordinate!(Point3, 3, 0, 1, 2);
impl_cgmath_coordinate!(Vector2, 2, 0, 1);
impl_cgmath_coordinate!(Vector3, 3, 0, 1, 2);

impl<T: Float, const N: usize> Coordinate for [T; N] {
    type Value = T;
    const DIMENSION: usize = N;

    #[inline(always)]
    fn component(&self, axis: usize) -> T {
        self[axis]
    }

    fn from_components(f: impl FnMut(usize) -> T) -> Self {
        std::array::from_fn(f)
    }
}

/// A `(x, y)` pair, such as the `(time, value)` keys of an animation curve.
impl<T: Float> Coordinate for (T, T) {
    type Value = T;
    const DIMENSION: usize = 2;

    #[inline(always)]
    fn component(&self, axis: usize) -> T {
        [self.0, self.1][axis]
    }

    fn from_components(mut f: impl FnMut(usize) -> T) -> Self {
        let x = f(0);
        let y = f(1);
        (x, y)
    }
}

macro_rules! impl_scalar_coordinate {
    ($($ty:ty),+) => {
        $(
            impl Coordinate for $ty {
                type Value = $ty;
                const DIMENSION: usize = 1;

                #[inline(always)]
                fn component(&self, axis: usize) -> $ty {
                    debug_assert_eq!(axis, 0);
                    *self
                }

                fn from_components(mut f: impl FnMut(usize) -> $ty) -> Self {
                    f(0)
                }
            }
        )+
    };
}

impl_scalar_coordinate!(f32, f64);
