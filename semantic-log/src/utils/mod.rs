//! # Utilities Module
//!
//! Rendering helpers shared by the sink and the facade.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod formatter;
pub(crate) mod markup;

pub use formatter::CategoryFormatter;
