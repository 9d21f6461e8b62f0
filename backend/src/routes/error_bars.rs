use serde::{Deserialize, Serialize};

use super::figure::Figure;

// =========================================================
// Error-bars view types
// =========================================================

/// Error-bars chart with the statistical comparison of the selected channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBarsData {
    pub figure: Figure,
    /// Empty when fewer than two channels are selected.
    pub summary: String,
}
