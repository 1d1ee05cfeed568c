//! Core build configuration
//!
//! This module contains the decision logic of the builder: the category
//! set, part records, the build itself, the compatibility rule set, the
//! engine that mutates the build, and the metric aggregator.

pub mod build;
pub mod category;
pub mod engine;
pub mod metrics;
pub mod monetary;
pub mod part;
pub mod rules;

pub use build::{Build, Slot};
pub use category::Category;
pub use engine::{Adjustment, BuildEngine, QuoteLine, QuoteSnapshot};
pub use metrics::{
    power_margin, psu_capacity, total_memory_sticks, total_power, total_price,
    BASELINE_POWER_WATTS, MEMORY_SLOTS,
};
pub use monetary::{CURRENCY_CODE, CURRENCY_SYMBOL};
pub use part::{CoolerKind, FormFactor, Part};
pub use rules::{check_compatibility, Attribute, PairRule, Rejection, RuleSet};
