//! # Rig Builder - My Custom PC Configuration Engine
//!
//! This is the engine behind the shop's "build your own PC" page, pulled
//! out of the UI so it can be tested on its own.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Build Engine**: one part per category, quantities, atomic place/remove
//! - **Compatibility Rules**: socket and memory-type checks that run in both
//!   directions, plus an optional form factor check
//! - **Metrics**: exact price totals, power estimate with a fixed baseline,
//!   PSU headroom indicator
//! - **Catalog**: offline parts list and a storefront adapter that reads
//!   `key:value` product tags, with fallback when the fetch fails
//! - **Quotes**: the inquiry message and the messaging deep link
//!
//! ## How I Organized My Code
//! - `core/`: categories, parts, the build, rules, engine, metrics
//! - `catalog/`: offline catalog, storefront normalization, provider
//! - `quote/`: message rendering and deep links
//! - `config/`: storefront credentials and switches
//! - `cli/`: terminal front end
//!
//! ## Key Design Decisions I Made
//! - Parts are plain data; rules are free functions over the whole build
//! - The engine is an explicit value, not a global, so tests need no setup
//! - Rejections are return values, never panics
//! - Prices are integer rupees so totals never drift

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod quote;

// Re-export commonly used types for convenience
pub use catalog::{offline_catalog, Catalog, CatalogProvider, CatalogSource, OfflineSource};
pub use cli::{Command, Gesture, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    check_compatibility, Adjustment, Build, BuildEngine, Category, Part, QuoteSnapshot, Rejection,
    RuleSet, BASELINE_POWER_WATTS,
};
pub use error::{BuilderError, Result};
pub use quote::{deep_link, render_message, QuoteDispatcher};
