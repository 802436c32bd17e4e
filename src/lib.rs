//----------------------------------------
// Root lib
//----------------------------------------
//! The purpose of this library is to provide utility functions for the
//! PoP (Posterior Predictive) phase I dose-finding design: decision
//! boundaries from a Bayes factor, isotonic MTD selection from observed
//! data, and operating characteristics from simulated trials.

/// This module houses the public API for computing boundaries, operating
/// characteristics, and MTD selections
pub mod compute;
/// This module contains error types
pub mod error;
pub mod pop_settings;
pub mod report;

pub mod bayes_factor;
pub mod boundary;
pub mod oc;
pub mod select_mtd;
pub mod simulation;
pub mod validation;
