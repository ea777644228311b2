//! # Utilities Module
//!
//! Grid geometry helpers shared by generation and visibility.

pub mod math;

pub use math::*;
