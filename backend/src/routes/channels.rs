use serde::{Deserialize, Serialize};

use crate::models::Channel;

// =========================================================
// Channel options types
// =========================================================

/// One entry of a channel multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOption {
    pub value: String,
    pub label: String,
}

impl From<&Channel> for ChannelOption {
    fn from(channel: &Channel) -> Self {
        Self {
            value: channel.column.clone(),
            label: channel.label.clone(),
        }
    }
}

/// Options shared by both views plus each view's initial selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOptions {
    pub options: Vec<ChannelOption>,
    pub plot_default: Vec<String>,
    pub error_bars_default: Vec<String>,
}
