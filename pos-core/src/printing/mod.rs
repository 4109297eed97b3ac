//! Receipt and report printing
//!
//! - `renderer`: HTML documents for the customer receipt and daily close
//! - `service`: the printer seam plus the logging and capture backends

pub mod renderer;
pub mod service;

pub use renderer::{render_daily_summary, render_receipt};
pub use service::{LogPrinter, MemoryPrinter, PrintService};
