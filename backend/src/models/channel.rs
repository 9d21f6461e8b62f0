//! Measurement channels.

use serde::{Deserialize, Serialize};

/// Value the data logger writes when a sensor produced no valid reading.
pub const SENTINEL: f64 = -9999.0;

/// A named measurement stream (one column of the source sheet).
///
/// `column` is the channel's identity: it must match the header in the input
/// file and is the value the dashboard uses in selections. `label` is only
/// used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub column: String,
    pub label: String,
}

impl Channel {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// The three target thermometers logged by the CR1000 station.
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel::new("TempC_target_1331", "IRT 1331"),
        Channel::new("TempC_target_1370", "IRT 1370"),
        Channel::new("TempC_target_1376", "IRT 1376"),
    ]
}
