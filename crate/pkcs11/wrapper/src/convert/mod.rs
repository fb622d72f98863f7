//! Converters between managed values and their native PKCS#11 representation.

pub mod buffer;
pub mod scalar;

pub use buffer::*;
pub use scalar::*;
