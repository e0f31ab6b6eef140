//! Hardware Module
//!
//! Provides disk eligibility rules and unit conversions used when checking
//! host inventories against operator requirements.

pub mod eligibility;
pub mod units;

pub use eligibility::*;
pub use units::*;
