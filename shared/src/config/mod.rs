//! Configuration module for fdbstat.
//!
//! This module contains the options that shape metric line rendering.

pub mod transform;

pub use transform::TransformConfig;
