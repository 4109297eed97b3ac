//! Category model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Flat list used only to filter the product grid; no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}
