//! Reading the logger export from disk.
//!
//! Format is picked from the file extension; workbooks (`.xlsx` and friends)
//! use the first worksheet, CSV exports use their header row.
//!
//! # Example
//!
//! ```no_run
//! use irt_dashboard::io::{load_table, DEFAULT_TIMESTAMP_COLUMN};
//! use irt_dashboard::models::default_channels;
//! use std::path::Path;
//!
//! let table = load_table(
//!     Path::new("comparison_data_analog_sensors.xlsx"),
//!     DEFAULT_TIMESTAMP_COLUMN,
//!     &default_channels(),
//! )
//! .expect("Failed to load");
//! println!("Loaded {} readings", table.len());
//! ```

pub mod error;
pub mod loader;


pub use error::{LoadError, LoadResult};
pub use loader::{load_table, SourceFormat, DEFAULT_TIMESTAMP_COLUMN, TIMESTAMP_FORMAT};
