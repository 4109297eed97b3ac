//! Printer seam
//!
//! The renderer produces documents; a [`PrintService`] gets them onto
//! paper. The default backend just logs, which keeps checkout working on
//! machines without a printer attached.

use parking_lot::Mutex;
use shared::AppResult;

pub trait PrintService: Send + Sync {
    fn print(&self, document: &str) -> AppResult<()>;
}

/// Logs the document instead of printing it
#[derive(Debug, Default, Clone)]
pub struct LogPrinter;

impl PrintService for LogPrinter {
    fn print(&self, document: &str) -> AppResult<()> {
        tracing::info!(bytes = document.len(), "print job");
        tracing::debug!(document, "print job body");
        Ok(())
    }
}

/// Captures printed documents for assertions
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    documents: Mutex<Vec<String>>,
}

impl MemoryPrinter {
    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().clone()
    }
}

impl PrintService for MemoryPrinter {
    fn print(&self, document: &str) -> AppResult<()> {
        self.documents.lock().push(document.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_printer_captures_in_order() {
        let printer = MemoryPrinter::default();
        printer.print("first").unwrap();
        printer.print("second").unwrap();
        assert_eq!(printer.documents(), vec!["first", "second"]);
    }
}
