//! Offline guidance: the lookups and checks that never touch the network.
//!
//! - Fee estimation from a hard-coded institution/course table
//! - JAMB and O'Level subject-combination lookups
//! - Local validation of the eligibility form before it becomes a request

pub mod combinations;
pub mod eligibility;
pub mod fees;

pub use eligibility::{EligibilityForm, Sittings};
