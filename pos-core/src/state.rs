//! Register state
//!
//! Wires every service to one remote store, one device cache and one
//! printer, then starts the catalog and fulfillment subscriptions.

use crate::catalog::CatalogService;
use crate::checkout::CheckoutService;
use crate::config::Config;
use crate::counter::OrderCounter;
use crate::fulfillment::FulfillmentBoard;
use crate::history::HistoryService;
use crate::media::{FsMediaStore, MediaStore};
use crate::printing::{LogPrinter, PrintService};
use crate::session::SessionManager;
use crate::stock::StockService;
use crate::store::{LocalCache, RemoteStore};
use shared::AppResult;
use std::sync::Arc;

#[derive(Clone)]
pub struct PosState {
    pub config: Config,
    pub store: Arc<dyn RemoteStore>,
    pub cache: LocalCache,
    pub catalog: CatalogService,
    pub checkout: CheckoutService,
    pub fulfillment: FulfillmentBoard,
    pub history: HistoryService,
    pub sessions: SessionManager,
    pub printer: Arc<dyn PrintService>,
}

impl PosState {
    pub fn new(
        config: Config,
        store: Arc<dyn RemoteStore>,
        cache: LocalCache,
        printer: Arc<dyn PrintService>,
    ) -> Self {
        let media: Arc<dyn MediaStore> = Arc::new(FsMediaStore::new(config.media_dir()));
        let counter = OrderCounter::new(store.clone(), cache.clone());
        let stock = StockService::new(store.clone());

        Self {
            catalog: CatalogService::new(store.clone()),
            checkout: CheckoutService::new(store.clone(), counter, stock),
            fulfillment: FulfillmentBoard::new(store.clone()),
            history: HistoryService::new(store.clone()),
            sessions: SessionManager::new(store.clone(), cache.clone(), media),
            printer,
            config,
            store,
            cache,
        }
    }

    /// Open the device cache and wire the default services
    pub fn initialize(config: Config, store: Arc<dyn RemoteStore>) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| shared::AppError::cache(format!("data dir: {e}")))?;
        let cache = LocalCache::open(config.cache_path())?;
        Ok(Self::new(config, store, cache, Arc::new(LogPrinter)))
    }

    /// Warm the caches and start the store subscriptions
    pub async fn start_background_tasks(&self) -> AppResult<()> {
        self.catalog.warmup().await?;
        self.fulfillment.warmup().await?;
        self.catalog.start();
        self.fulfillment.start();
        Ok(())
    }
}
