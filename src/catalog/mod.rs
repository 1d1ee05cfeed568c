//! Part catalog
//!
//! A catalog maps each category to an ordered list of parts. Two sources
//! produce catalogs of the same shape: the built-in offline list and the
//! storefront adapter, which normalizes tagged product records. The
//! provider keeps whichever catalog last loaded successfully.

pub mod offline;
pub mod provider;
pub mod storefront;

pub use offline::{offline_catalog, OfflineSource};
pub use provider::{CatalogProvider, RefreshOutcome, CATALOG_UNAVAILABLE_ADVISORY};
#[cfg(feature = "storefront")]
pub use storefront::StorefrontClient;
pub use storefront::{normalize_product, parse_response, parse_tags, TagSpecs};

use crate::core::{Category, Part};
use crate::error::{BuilderError, Result};
use log::warn;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Anything that can hand over a full catalog
pub trait CatalogSource {
    /// Short name for logs
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Catalog>;
}

/// Parts grouped by category, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    parts: BTreeMap<Category, Vec<Arc<Part>>>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    /// Add a part under its own category. A part whose id already exists in
    /// that category replaces the earlier entry in place.
    pub fn insert(&mut self, part: Part) {
        let entries = self.parts.entry(part.category).or_default();
        match entries.iter().position(|p| p.id == part.id) {
            Some(index) => {
                warn!("Duplicate {} part id {}, keeping the later record", part.category, part.id);
                entries[index] = Arc::new(part);
            }
            None => entries.push(Arc::new(part)),
        }
    }

    /// Parts in `category`; a category the source never mentioned is empty
    pub fn parts(&self, category: Category) -> &[Arc<Part>] {
        self.parts.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, category: Category, id: &str) -> Option<&Arc<Part>> {
        self.parts(category).iter().find(|p| p.id == id)
    }

    /// Like `find`, but an unknown id is an error
    pub fn require(&self, category: Category, id: &str) -> Result<Arc<Part>> {
        self.find(category, id)
            .cloned()
            .ok_or_else(|| BuilderError::UnknownPart {
                category: category.to_string(),
                id: id.to_string(),
            })
    }

    /// Total number of parts across categories
    pub fn len(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive match on name or brand, grouped by category in
    /// display order. Categories with no match are left out.
    pub fn search(&self, term: &str) -> Vec<(Category, Vec<Arc<Part>>)> {
        let needle = term.trim().to_lowercase();
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let matches: Vec<Arc<Part>> = self
                    .parts(category)
                    .iter()
                    .filter(|p| {
                        p.name.to_lowercase().contains(&needle)
                            || p.brand.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    None
                } else {
                    Some((category, matches))
                }
            })
            .collect()
    }
}

impl FromIterator<Part> for Catalog {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for part in iter {
            catalog.insert(part);
        }
        catalog
    }
}
