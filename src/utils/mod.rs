//! Utility functions.

pub mod matrix;
