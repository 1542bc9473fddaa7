//! Scalar conversions.
//!
//! A configuration scalar is a [`Tri`] over one of the widest primitives
//! (`bool`, `i64`, `f64`, `String`) or a string enum. The domain side may use
//! the same type or a narrower numeric one; narrowing must be lossless.

use crate::common::{Scalar, Tri};
use crate::error::Result;

use super::{Bridge, Lowered, Presence, Walk};

/// A domain-side scalar representable by configuration scalar `T`
pub trait DomainScalar<T>: Sized + Default + PartialEq {
    fn from_config(value: &T, walk: &Walk<'_>) -> Result<Self>;

    fn to_config(&self, walk: &Walk<'_>) -> Result<T>;
}

impl<T: Scalar> DomainScalar<T> for T {
    fn from_config(value: &T, _walk: &Walk<'_>) -> Result<Self> {
        Ok(value.clone())
    }

    fn to_config(&self, _walk: &Walk<'_>) -> Result<T> {
        Ok(self.clone())
    }
}

macro_rules! integer_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DomainScalar<i64> for $ty {
                fn from_config(value: &i64, walk: &Walk<'_>) -> Result<Self> {
                    <$ty>::try_from(*value).map_err(|_| walk.out_of_range(value, stringify!($ty)))
                }

                fn to_config(&self, walk: &Walk<'_>) -> Result<i64> {
                    i64::try_from(*self).map_err(|_| walk.out_of_range(self, "i64"))
                }
            }
        )*
    };
}

integer_width!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl DomainScalar<f64> for f32 {
    /// Narrows only values an `f32` represents exactly. NaN passes through.
    #[allow(clippy::cast_possible_truncation)]
    fn from_config(value: &f64, walk: &Walk<'_>) -> Result<Self> {
        let narrowed = *value as f32;
        if !value.is_nan() && f64::from(narrowed) != *value {
            return Err(walk.out_of_range(value, "f32"));
        }
        Ok(narrowed)
    }

    fn to_config(&self, _walk: &Walk<'_>) -> Result<f64> {
        Ok(f64::from(*self))
    }
}

impl<T, D> Bridge<D> for Tri<T>
where
    T: Scalar,
    D: DomainScalar<T>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<D>> {
        match self {
            Tri::Value(value) => Ok(Lowered::explicit(D::from_config(value, walk)?)),
            Tri::Unset | Tri::Null => Ok(Lowered::implicit(D::default())),
        }
    }

    fn to_config(domain: &D, presence: Presence, walk: &mut Walk<'_>) -> Result<Self> {
        match presence {
            Presence::Unmarked if *domain == D::default() => Ok(Tri::Unset),
            Presence::Marked | Presence::Unmarked | Presence::Element => {
                Ok(Tri::Value(DomainScalar::to_config(domain, walk)?))
            }
        }
    }
}
