//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::channels::ChannelOption;
pub use crate::routes::channels::ChannelOptions;
pub use crate::routes::error_bars::ErrorBarsData;
pub use crate::routes::figure::Axis;
pub use crate::routes::figure::ErrorBars;
pub use crate::routes::figure::Figure;
pub use crate::routes::figure::Font;
pub use crate::routes::figure::Layout;
pub use crate::routes::figure::Title;
pub use crate::routes::figure::Trace;
