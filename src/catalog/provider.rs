use crate::catalog::{offline_catalog, Catalog, CatalogSource};
use crate::error::BuilderError;
use log::{info, warn};

/// Shown while the builder runs on a fallback catalog
pub const CATALOG_UNAVAILABLE_ADVISORY: &str = "Failed to load live data. Using offline catalog.";

/// What a refresh did
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The new catalog is now current
    Updated { parts: usize },
    /// The source failed; the previous catalog is still current
    FellBack { reason: BuilderError },
}

/// Holds the catalog the builder currently shows
///
/// Starts on the offline catalog. A refresh either swaps in the fetched
/// catalog or keeps the last good one and raises an advisory. Builds never
/// depend on the provider, so a refresh cannot disturb one in progress.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    catalog: Catalog,
    live: bool,
    advisory: Option<String>,
}

impl Default for CatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider {
    pub fn new() -> CatalogProvider {
        Self::with_catalog(offline_catalog())
    }

    pub fn with_catalog(catalog: Catalog) -> CatalogProvider {
        CatalogProvider {
            catalog,
            live: false,
            advisory: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// True once a refresh has succeeded
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Non-blocking notice for the presentation layer
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Fetch from `source` once. No retry: calling again is the recovery.
    pub fn refresh(&mut self, source: &dyn CatalogSource) -> RefreshOutcome {
        let fetched = source.fetch().and_then(|catalog| {
            if catalog.is_empty() {
                Err(BuilderError::Catalog(format!(
                    "{} returned no usable parts",
                    source.name()
                )))
            } else {
                Ok(catalog)
            }
        });

        match fetched {
            Ok(catalog) => {
                let parts = catalog.len();
                info!("Loaded {parts} parts from {}", source.name());
                self.catalog = catalog;
                self.live = true;
                self.advisory = None;
                RefreshOutcome::Updated { parts }
            }
            Err(reason) => {
                warn!("Catalog fetch from {} failed: {reason}", source.name());
                self.advisory = Some(CATALOG_UNAVAILABLE_ADVISORY.to_string());
                RefreshOutcome::FellBack { reason }
            }
        }
    }
}
