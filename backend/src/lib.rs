//! # IRT Dashboard Backend
//!
//! Serves an interactive comparison of infrared thermometer (IRT) target
//! temperatures logged by a field data logger.
//!
//! ## Pipeline
//!
//! 1. [`io`] reads the logger export (workbook or CSV), masking the
//!    `-9999` sentinel as missing.
//! 2. [`transformations`] averages readings into fixed 5-minute buckets and
//!    computes the rolling deviation used for error bars.
//! 3. [`services`] turns a channel selection into chart figures and runs a
//!    paired t-test or a repeated-measures ANOVA across the selection.
//! 4. [`http`] exposes the page and its JSON endpoints via Axum.
//!
//! ## Modules
//!
//! - [`api`]: DTOs returned to the browser
//! - [`config`]: TOML and environment configuration
//! - [`models`]: Channels, tables and selections
//! - [`routes`]: Route-specific data types

pub mod api;
pub mod config;
pub mod io;
pub mod models;
pub mod routes;
pub mod services;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;
