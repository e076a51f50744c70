//! Listing intake and payment validation core for the Roogo rental marketplace.

pub mod config;
pub mod error;
pub mod listings;
pub mod payments;
pub mod policy;
pub mod ratelimit;
pub mod telemetry;
pub mod validation;
