//! Conversions through optional, boxed and repeated values.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::Result;

use super::{Bridge, Lowered, Presence, Walk};

impl<C, D> Bridge<Option<D>> for Option<C>
where
    C: Bridge<D>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<Option<D>>> {
        match self {
            Some(config) => Ok(Lowered::implicit(Some(config.to_domain(walk)?.value))),
            None => Ok(Lowered::implicit(None)),
        }
    }

    fn to_config(domain: &Option<D>, presence: Presence, walk: &mut Walk<'_>) -> Result<Self> {
        domain
            .as_ref()
            .map(|domain| C::to_config(domain, presence, walk))
            .transpose()
    }
}

impl<C, D> Bridge<Box<D>> for Box<C>
where
    C: Bridge<D>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<Box<D>>> {
        let Lowered { value, explicit } = <C as Bridge<D>>::to_domain(&**self, walk)?;
        Ok(Lowered {
            value: Box::new(value),
            explicit,
        })
    }

    fn to_config(domain: &Box<D>, presence: Presence, walk: &mut Walk<'_>) -> Result<Self> {
        C::to_config(domain, presence, walk).map(Box::new)
    }
}

fn lower_elements<C, D>(elements: &[C], walk: &mut Walk<'_>) -> Result<Vec<D>>
where
    C: Bridge<D>,
{
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            walk.descend(index.to_string(), |walk| Ok(element.to_domain(walk)?.value))
        })
        .collect()
}

fn raise_elements<C, D>(elements: &[D], walk: &mut Walk<'_>) -> Result<Vec<C>>
where
    C: Bridge<D>,
{
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            walk.descend(index.to_string(), |walk| {
                C::to_config(element, Presence::Element, walk)
            })
        })
        .collect()
}

impl<C, D> Bridge<Vec<D>> for Vec<C>
where
    C: Bridge<D>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<Vec<D>>> {
        lower_elements(self, walk).map(Lowered::implicit)
    }

    fn to_config(domain: &Vec<D>, _presence: Presence, walk: &mut Walk<'_>) -> Result<Self> {
        raise_elements(domain, walk)
    }
}

/// A list whose absence is distinct from emptiness.
///
/// The domain side keeps a plain `Vec`; a configured list, even an empty
/// one, lands in the marker list, and an unmarked empty list raises to
/// `None`.
impl<C, D> Bridge<Vec<D>> for Option<Vec<C>>
where
    C: Bridge<D>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<Vec<D>>> {
        match self {
            Some(elements) => lower_elements(elements, walk).map(Lowered::explicit),
            None => Ok(Lowered::implicit(Vec::new())),
        }
    }

    fn to_config(domain: &Vec<D>, presence: Presence, walk: &mut Walk<'_>) -> Result<Self> {
        if presence == Presence::Unmarked && domain.is_empty() {
            return Ok(None);
        }
        raise_elements(domain, walk).map(Some)
    }
}

impl<C, D> Bridge<BTreeMap<String, D>> for BTreeMap<String, C>
where
    C: Bridge<D>,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<BTreeMap<String, D>>> {
        self.iter()
            .map(|(key, value)| {
                let value = walk.descend(key.as_str(), |walk| value.to_domain(walk))?.value;
                Ok((key.clone(), value))
            })
            .collect::<Result<_>>()
            .map(Lowered::implicit)
    }

    fn to_config(
        domain: &BTreeMap<String, D>,
        _presence: Presence,
        walk: &mut Walk<'_>,
    ) -> Result<Self> {
        domain
            .iter()
            .map(|(key, value)| {
                let value = walk.descend(key.as_str(), |walk| {
                    C::to_config(value, Presence::Element, walk)
                })?;
                Ok((key.clone(), value))
            })
            .collect()
    }
}

impl<C, D, S1, S2> Bridge<HashMap<String, D, S2>> for HashMap<String, C, S1>
where
    C: Bridge<D>,
    S1: BuildHasher + Default,
    S2: BuildHasher + Default,
{
    fn to_domain(&self, walk: &mut Walk<'_>) -> Result<Lowered<HashMap<String, D, S2>>> {
        self.iter()
            .map(|(key, value)| {
                let value = walk.descend(key.as_str(), |walk| value.to_domain(walk))?.value;
                Ok((key.clone(), value))
            })
            .collect::<Result<_>>()
            .map(Lowered::implicit)
    }

    fn to_config(
        domain: &HashMap<String, D, S2>,
        _presence: Presence,
        walk: &mut Walk<'_>,
    ) -> Result<Self> {
        domain
            .iter()
            .map(|(key, value)| {
                let value = walk.descend(key.as_str(), |walk| {
                    C::to_config(value, Presence::Element, walk)
                })?;
                Ok((key.clone(), value))
            })
            .collect()
    }
}
