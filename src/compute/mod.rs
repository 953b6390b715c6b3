//! Compute helpers shared by the tiling layers.
//!
//! Input validation lives here so tile construction and rasterization apply
//! the same coordinate rules.

pub mod validation;
