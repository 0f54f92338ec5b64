//! # Semantic Log - Intention-Revealing Console Logging
//!
//! A thin layer over `tracing` and `nu-ansi-term`: a table of semantic
//! categories (read, stage, metric, warning, ...) each with a label, color
//! and severity, and a [`Logger`] exposing one method per category.
//!
//! ```
//! use semantic_log::Logger;
//!
//! let logger = Logger::new("pipeline");
//! logger.read("Loading dataset");
//! logger.metric("MAE=3.21 RMSE=4.09");
//! logger.error("Failed to write output file");
//! ```
//!
//! ## Modules
//!
//! - [`category`] - Category table, severities and label colors
//! - [`config`] - Sink rendering configuration
//! - [`error`] - Typed error handling with thiserror
//! - [`logger`] - The per-stream facade
//! - [`scope`] - Active error tracking for tracebacks
//! - [`sink`] - Named sinks and their registry

pub mod category;
pub mod config;
pub mod error;
pub mod logger;
pub mod scope;
pub mod sink;
pub(crate) mod utils;

pub use category::{CategoryDescriptor, CategoryTable, LabelColor, Severity, BUILTIN_CATEGORIES};
pub use config::{SinkConfig, SinkTarget};
pub use error::LogError;
pub use logger::{Logger, LoggerBuilder, LABEL_WIDTH, TRACEBACK_LABEL};
pub use scope::{active_error, error_scope, ErrorScope};
pub use sink::{Sink, SinkRegistry, RECORD_TARGET};
