//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::services::{CheckoutPipeline, TokioClock};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the catalog, and the checkout pipeline.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    checkout: CheckoutPipeline<TokioClock>,
}

impl AppState {
    /// Create application state with an explicit catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let checkout = CheckoutPipeline::new(config.checkout, TokioClock);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
            }),
        }
    }

    /// Create application state, loading the catalog named by the config.
    ///
    /// Falls back to the built-in catalog when no catalog path is configured.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a configured catalog file cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::from_json_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    products = catalog.products().len(),
                    "Catalog loaded"
                );
                catalog
            }
            None => Catalog::default(),
        };
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the checkout pipeline.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutPipeline<TokioClock> {
        &self.inner.checkout
    }
}
