//! Cafe register core
//!
//! Order-taking core for a small cafe: a live product catalog, a cart with
//! merge-by-line semantics, discount handling, an atomic checkout over the
//! shared store, a fulfillment board and the transaction history screen.
//!
//! # Module structure
//!
//! ```text
//! pos-core/src/
//! ├── store/         # remote tree store, device cache, saga journal
//! ├── catalog.rs     # live product/category cache
//! ├── cart.rs        # cart lines and totals
//! ├── checkout.rs    # prepare/commit orchestration
//! ├── counter.rs     # shared order-number counter
//! ├── stock.rs       # ingredient and utensil decrements
//! ├── fulfillment.rs # pending-orders board
//! ├── history.rs     # transaction history and daily close
//! ├── session.rs     # staff login and profile
//! ├── printing/      # receipt and report rendering
//! └── media.rs       # profile photo storage
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod counter;
pub mod fulfillment;
pub mod history;
pub mod logger;
pub mod media;
pub mod printing;
pub mod session;
pub mod state;
pub mod stock;
pub mod store;

pub use cart::{Cart, CartLine, LineKey, Totals};
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use config::Config;
pub use counter::OrderCounter;
pub use fulfillment::{FulfillmentBoard, PendingOrder, PreferenceFilter};
pub use history::{HistoryService, TransactionRow};
pub use logger::{init_logger, init_logger_with_file};
pub use media::{FsMediaStore, MediaStore};
pub use printing::{LogPrinter, PrintService};
pub use session::{Session, SessionManager};
pub use state::PosState;
pub use stock::StockService;
pub use store::{LocalCache, MemoryStore, RemoteStore};

// Re-export unified error types from shared
pub use shared::{AppError, AppResult, ErrorCode};
