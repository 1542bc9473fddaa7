//! Utility functions for error handling

use itertools::Itertools;

use crate::error::SchemaDefect;

/// Abort schema assembly on a defect.
///
/// The defect is logged at error level, then raised as a panic carrying the
/// defect message.
#[track_caller]
pub fn fail_fast(defect: SchemaDefect) -> ! {
    log::error!("schema defect: {defect}");
    panic!("{defect}")
}

/// Join path segments with dots, the way schema paths and error paths are printed
pub fn join_path<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    segments.into_iter().join(".")
}
