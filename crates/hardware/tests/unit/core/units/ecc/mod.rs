//! ECC unit tests.

/// SEC-DED codec.
pub mod codec;

/// Metadata layout.
pub mod metadata;
