use crate::core::metrics;
use crate::core::rules::{Rejection, RuleSet};
use crate::core::{Build, Category, Part};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Result of a quantity step. Callers are free to ignore it: a step that
/// does not apply leaves the build exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Changed { from: u32, to: u32 },
    /// Nothing in that category
    Empty,
    /// Already at 1 and asked to go lower
    AtMinimum,
    /// Steps are +1 or -1; anything else is ignored
    InvalidStep { delta: i32 },
    /// Would need more physical slots than exist
    OverCapacity { requested: u32, limit: u32 },
}

impl Adjustment {
    pub fn is_changed(&self) -> bool {
        matches!(self, Adjustment::Changed { .. })
    }
}

/// One bill line handed to the quote dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub category: Category,
    pub category_label: &'static str,
    pub part_name: String,
    pub quantity: u32,
    pub line_total: u64,
}

/// Everything a quote needs, captured at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSnapshot {
    pub session_id: Uuid,
    pub lines: Vec<QuoteLine>,
    pub total_price: u64,
    pub total_power: u32,
}

impl QuoteSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Physical units one quantity step consumes, and how many exist.
/// Only memory is capacity limited.
fn capacity(category: Category, part: &Part) -> Option<(u32, u32)> {
    match category {
        Category::Memory => Some((part.sticks_per_kit(), metrics::MEMORY_SLOTS)),
        _ => None,
    }
}

/// The build configuration engine
///
/// Sole owner and mutator of one session's build. Every placement goes
/// through the rule set; rejected changes never partially apply.
#[derive(Debug, Clone)]
pub struct BuildEngine {
    session_id: Uuid,
    build: Build,
    rules: RuleSet,
}

impl Default for BuildEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildEngine {
    /// Engine with an empty build and the standard rules
    pub fn new() -> BuildEngine {
        Self::with_rules(RuleSet::standard())
    }

    pub fn with_rules(rules: RuleSet) -> BuildEngine {
        BuildEngine {
            session_id: Uuid::new_v4(),
            build: Build::new(),
            rules,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Put `part` into `category`, replacing any current occupant.
    ///
    /// The candidate is checked against the build as it stands, so the part
    /// being replaced never takes part in the check. On success the slot's
    /// quantity is 1 regardless of what it was before.
    pub fn place(&mut self, part: impl Into<Arc<Part>>, category: Category) -> Result<(), Rejection> {
        let part = part.into();
        // I check before touching the build, so a rejection leaves nothing half done
        if let Err(rejection) = self.rules.check(&part, category, &self.build) {
            warn!("[{}] Rejected {} for {category}: {rejection}", self.session_id, part.name);
            return Err(rejection);
        }

        // occupy hands back the old slot so I can log what was swapped out
        match self.build.occupy(category, Arc::clone(&part)) {
            Some(previous) => info!(
                "[{}] Replaced {} with {} in {category}",
                self.session_id,
                previous.part().name,
                part.name
            ),
            None => info!("[{}] Placed {} in {category}", self.session_id, part.name),
        }
        Ok(())
    }

    /// Empty `category`. Removing from an empty category does nothing.
    pub fn remove(&mut self, category: Category) {
        if let Some(slot) = self.build.vacate(category) {
            info!("[{}] Removed {} from {category}", self.session_id, slot.part().name);
        }
    }

    /// Step the quantity of `category` by `delta` (+1 or -1), never below 1.
    ///
    /// Memory is bounded by the board's slots: a step that would need more
    /// sticks than `MEMORY_SLOTS` is ignored.
    pub fn set_quantity(&mut self, category: Category, delta: i32) -> Adjustment {
        // I only take single steps, the same as the +/- buttons
        if delta != 1 && delta != -1 {
            debug!("[{}] Ignoring {category} step of {delta}", self.session_id);
            return Adjustment::InvalidStep { delta };
        }
        let Some(slot) = self.build.get(category) else {
            return Adjustment::Empty;
        };
        let current = slot.quantity();
        let requested = if delta > 0 {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        if requested == 0 {
            return Adjustment::AtMinimum;
        }

        // Only memory has a capacity entry; every other category steps freely
        if let Some((units, limit)) = capacity(category, slot.part()) {
            if requested.saturating_mul(units) > limit {
                debug!(
                    "[{}] Ignoring {category} quantity {requested}: {} of {limit} slots",
                    self.session_id,
                    requested.saturating_mul(units)
                );
                return Adjustment::OverCapacity { requested, limit };
            }
        }

        self.build.set_quantity(category, requested);
        debug!("[{}] {category} quantity {current} -> {requested}", self.session_id);
        Adjustment::Changed {
            from: current,
            to: requested,
        }
    }

    /// Drop every selection
    pub fn reset(&mut self) {
        self.build.clear();
        info!("[{}] Build reset", self.session_id);
    }

    pub fn total_price(&self) -> u64 {
        metrics::total_price(&self.build)
    }

    pub fn total_power(&self) -> u32 {
        metrics::total_power(&self.build)
    }

    pub fn power_margin(&self) -> bool {
        metrics::power_margin(&self.build)
    }

    pub fn total_memory_sticks(&self) -> u32 {
        metrics::total_memory_sticks(&self.build)
    }

    /// Flatten the current build for the quote dispatcher
    pub fn quote(&self) -> QuoteSnapshot {
        let lines = self
            .build
            .slots()
            .map(|(category, slot)| QuoteLine {
                category,
                category_label: category.label(),
                part_name: slot.part().name.clone(),
                quantity: slot.quantity(),
                line_total: slot.line_total(),
            })
            .collect();

        QuoteSnapshot {
            session_id: self.session_id,
            lines,
            total_price: self.total_price(),
            total_power: self.total_power(),
        }
    }
}
