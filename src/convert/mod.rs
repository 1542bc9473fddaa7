//! Struct converter between configuration-model and domain-model records.
//!
//! Conversion is a type-directed traversal. Each configuration-side type
//! implements [`Bridge`] for its domain-side counterpart: the library covers
//! [`Tri`](crate::Tri) scalars, `Option`, `Box`, `Vec` and string-keyed
//! maps, and `#[derive(Record)]` covers records by pairing fields by name.
//! Shape mismatches between the two sides therefore fail to compile; what
//! remains at runtime are value-level problems reported as
//! [`ConversionError`](crate::error::ConversionError).

mod batch;
mod collections;
mod context;
mod scalar;

pub use batch::{to_config_batch, to_domain_batch};
pub use context::{ConversionContext, Walk};
pub use scalar::DomainScalar;

use crate::error::Result;

/// How a domain value came to be, as far as the configuration side can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Named in the record's marker list
    Marked,
    /// Not named in the marker list, or the record has none
    Unmarked,
    /// Element of a collection, always present
    Element,
}

impl Presence {
    /// Presence of `field` given a record's marker list
    #[must_use]
    pub fn of(markers: &[String], field: &str) -> Self {
        if markers.iter().any(|marker| marker == field) {
            Self::Marked
        } else {
            Self::Unmarked
        }
    }
}

/// A domain value and whether it was explicitly supplied
#[derive(Debug, Clone, PartialEq)]
pub struct Lowered<D> {
    pub value: D,
    pub explicit: bool,
}

impl<D> Lowered<D> {
    /// A value that belongs in the marker list
    pub fn explicit(value: D) -> Self {
        Self {
            value,
            explicit: true,
        }
    }

    pub fn implicit(value: D) -> Self {
        Self {
            value,
            explicit: false,
        }
    }
}

/// Conversion between a configuration-side type and its domain-side type `D`
pub trait Bridge<D>: Sized {
    /// Lower a configuration value into its domain form
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<D>>;

    /// Raise a domain value into its configuration form
    fn to_config(domain: &D, presence: Presence, walk: &mut Walk<'_>) -> Result<Self>;
}

/// Lower one record field into `slot`, returning whether it was explicit
pub fn lower_field<C, D>(config: &C, slot: &mut D, walk: &mut Walk<'_>) -> Result<bool>
where
    C: Bridge<D>,
{
    let lowered = config.to_domain(walk)?;
    *slot = lowered.value;
    Ok(lowered.explicit)
}

/// Raise one record field
pub fn raise_field<C, D>(domain: &D, presence: Presence, walk: &mut Walk<'_>) -> Result<C>
where
    C: Bridge<D>,
{
    C::to_config(domain, presence, walk)
}

/// Convert a configuration-model record into its domain-model counterpart
pub fn to_domain<C, D>(config: &C, context: &ConversionContext) -> Result<D>
where
    C: Bridge<D>,
{
    let mut walk = Walk::new(context);
    Ok(config.to_domain(&mut walk)?.value)
}

/// Convert a domain-model record into its configuration-model counterpart
pub fn to_config<C, D>(domain: &D, context: &ConversionContext) -> Result<C>
where
    C: Bridge<D>,
{
    let mut walk = Walk::new(context);
    C::to_config(domain, Presence::Marked, &mut walk)
}

/// [`to_domain`] writing into an existing record; `out` is untouched on error
pub fn to_domain_into<C, D>(config: &C, out: &mut D, context: &ConversionContext) -> Result<()>
where
    C: Bridge<D>,
{
    *out = to_domain(config, context)?;
    Ok(())
}

/// [`to_config`] writing into an existing record; `out` is untouched on error
pub fn to_config_into<C, D>(domain: &D, out: &mut C, context: &ConversionContext) -> Result<()>
where
    C: Bridge<D>,
{
    *out = to_config(domain, context)?;
    Ok(())
}
