//! Metric aggregator
//!
//! Read-only totals derived from a build. Prices are integers in whole
//! currency units so sums are exact; power is in watts.

use crate::core::{Build, Category};

/// Draw not attributable to any listed part (board, fans, peripherals)
pub const BASELINE_POWER_WATTS: u32 = 100;

/// Physical memory slots on every supported board
pub const MEMORY_SLOTS: u32 = 4;

/// Sum of price x quantity over occupied slots, saturating at `u64::MAX`
pub fn total_price(build: &Build) -> u64 {
    build
        .slots()
        .fold(0u64, |total, (_, slot)| total.saturating_add(slot.line_total()))
}

/// Sum of power draw x quantity over occupied slots, plus the baseline.
/// Saturates at `u32::MAX`.
pub fn total_power(build: &Build) -> u32 {
    build
        .slots()
        .map(|(_, slot)| slot.part().power_draw.saturating_mul(slot.quantity()))
        .fold(BASELINE_POWER_WATTS, u32::saturating_add)
}

/// Rated output of the selected power supply, 0 when none is selected
pub fn psu_capacity(build: &Build) -> u32 {
    build
        .part(Category::Psu)
        .and_then(|psu| psu.wattage_rating)
        .unwrap_or(0)
}

/// True when the power supply covers the estimated draw.
/// Advisory only; nothing is ever blocked on this.
pub fn power_margin(build: &Build) -> bool {
    total_power(build) <= psu_capacity(build)
}

/// Populated memory slots (kits x sticks per kit)
pub fn total_memory_sticks(build: &Build) -> u32 {
    build
        .get(Category::Memory)
        .map(|slot| slot.quantity().saturating_mul(slot.part().sticks_per_kit()))
        .unwrap_or(0)
}
