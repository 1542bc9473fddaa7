//! Types shared across the crate

pub mod traits;
pub mod tri;

pub use traits::Scalar;
pub use tri::Tri;
