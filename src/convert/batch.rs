//! Batch conversion on the rayon thread pool.
//!
//! Each record converts independently and keeps its own result, so one bad
//! record does not poison the batch. Results come back in input order.

use rayon::prelude::*;

use crate::error::Result;

use super::{Bridge, ConversionContext, to_config, to_domain};

/// Convert many configuration-model records
pub fn to_domain_batch<C, D>(configs: &[C], context: &ConversionContext) -> Vec<Result<D>>
where
    C: Bridge<D> + Sync,
    D: Send,
{
    if configs.len() < context.config().parallel_threshold {
        return configs.iter().map(|config| to_domain(config, context)).collect();
    }

    log::debug!(
        "{}: converting {} records to the domain model in parallel",
        context.operation(),
        configs.len()
    );
    configs
        .par_iter()
        .map(|config| to_domain(config, context))
        .collect()
}

/// Convert many domain-model records
pub fn to_config_batch<C, D>(domains: &[D], context: &ConversionContext) -> Vec<Result<C>>
where
    C: Bridge<D> + Send,
    D: Sync,
{
    if domains.len() < context.config().parallel_threshold {
        return domains.iter().map(|domain| to_config(domain, context)).collect();
    }

    log::debug!(
        "{}: converting {} records to the configuration model in parallel",
        context.operation(),
        domains.len()
    );
    domains
        .par_iter()
        .map(|domain| to_config(domain, context))
        .collect()
}
