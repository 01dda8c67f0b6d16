//! PowerCost Estimator library
//!
//! This module exposes the appliance catalog and the cost engine for use
//! in tests, the binaries, and as a library.

pub mod catalog;
pub mod core;
pub mod pricing;
