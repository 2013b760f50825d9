//! # Unit Components
//!
//! Tests grouped by the source module they exercise.
