use crate::core::{Category, Part};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A filled category: the chosen part and how many of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    part: Arc<Part>,
    quantity: u32,
}

impl Slot {
    fn new(part: Arc<Part>) -> Slot {
        Slot { part, quantity: 1 }
    }

    pub fn part(&self) -> &Arc<Part> {
        &self.part
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// price x quantity, saturating at `u64::MAX`
    pub fn line_total(&self) -> u64 {
        self.part.price.saturating_mul(u64::from(self.quantity))
    }
}

/// The current selection, one optional slot per category
///
/// A quantity only ever exists alongside a part, so the "quantity iff
/// occupied" rule holds by construction. Mutation is crate-private: the
/// engine is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Build {
    slots: BTreeMap<Category, Slot>,
}

impl Build {
    pub fn new() -> Build {
        Build::default()
    }

    pub fn get(&self, category: Category) -> Option<&Slot> {
        self.slots.get(&category)
    }

    pub fn part(&self, category: Category) -> Option<&Arc<Part>> {
        self.slots.get(&category).map(Slot::part)
    }

    pub fn quantity(&self, category: Category) -> Option<u32> {
        self.slots.get(&category).map(Slot::quantity)
    }

    pub fn is_occupied(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots in category display order
    pub fn slots(&self) -> impl Iterator<Item = (Category, &Slot)> {
        self.slots.iter().map(|(category, slot)| (*category, slot))
    }

    pub(crate) fn occupy(&mut self, category: Category, part: Arc<Part>) -> Option<Slot> {
        self.slots.insert(category, Slot::new(part))
    }

    pub(crate) fn vacate(&mut self, category: Category) -> Option<Slot> {
        self.slots.remove(&category)
    }

    pub(crate) fn set_quantity(&mut self, category: Category, quantity: u32) {
        if let Some(slot) = self.slots.get_mut(&category) {
            slot.quantity = quantity.max(1);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
