//! # Logger Facade
//!
//! A [`Logger`] binds a stream name to its sink and exposes one method per
//! category (`read`, `metric`, `error`, ...; see [`crate::category`]).

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};

use crate::category::{CategoryDescriptor, CategoryTable, LabelColor, Severity};
use crate::config::SinkConfig;
use crate::error::LogError;
use crate::scope;
use crate::sink::{Sink, SinkRegistry};
use crate::utils::markup;

/// Minimum width of the label column.
pub const LABEL_WIDTH: usize = 8;

/// Records with this label (any case) carry the active error's traceback.
pub const TRACEBACK_LABEL: &str = "DEBUG";

#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    sink: Arc<Sink>,
    categories: Arc<CategoryTable>,
}

impl Logger {
    /// Logger on the global registry with the default sink configuration
    /// and the builtin categories.
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Emits `message` under the category called `category`.
    #[track_caller]
    pub fn log_as(&self, category: &str, message: impl fmt::Display) -> Result<(), LogError> {
        let descriptor = self.categories.resolve(category)?;
        self.emit_descriptor(descriptor, &message);
        Ok(())
    }

    /// Formats `label` into a colored, left-aligned column of at least
    /// [`LABEL_WIDTH`] characters, prefixes it to `message` and writes the
    /// result at `severity`.
    #[track_caller]
    pub fn emit(
        &self,
        message: impl fmt::Display,
        label: &str,
        severity: Severity,
        color: LabelColor,
    ) {
        let padded = format!("{:<width$}", label, width = LABEL_WIDTH);
        let text = format!("{} {}", markup::wrap(color, &padded), message);

        let traceback = if label.eq_ignore_ascii_case(TRACEBACK_LABEL) {
            scope::active_error()
        } else {
            None
        };

        self.sink
            .emit(severity, &text, Location::caller(), traceback.as_deref());
    }

    #[track_caller]
    pub(crate) fn emit_descriptor(&self, descriptor: &CategoryDescriptor, message: &dyn fmt::Display) {
        self.emit(
            message,
            &descriptor.label,
            descriptor.severity,
            descriptor.color,
        );
    }
}

/// Configures a [`Logger`] before its sink is registered.
///
/// Sink settings (`sink_config`, `writer`) only take effect when the stream
/// name has no sink yet; otherwise the existing sink is reused unchanged.
pub struct LoggerBuilder {
    name: String,
    config: SinkConfig,
    categories: CategoryTable,
    registry: Option<Arc<SinkRegistry>>,
    writer: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: SinkConfig::default(),
            categories: CategoryTable::builtin(),
            registry: None,
            writer: None,
        }
    }

    pub fn sink_config(mut self, config: SinkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// Registry to look the sink up in. Defaults to [`SinkRegistry::global`].
    pub fn registry(mut self, registry: Arc<SinkRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Writes records somewhere other than the configured console stream.
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    pub fn build(self) -> Logger {
        let LoggerBuilder {
            name,
            config,
            categories,
            registry,
            writer,
        } = self;

        let registry = registry.unwrap_or_else(SinkRegistry::global);
        let sink = registry.get_or_create(&name, || match writer {
            Some(writer) => Sink::with_writer(name.as_str(), config, writer),
            None => Sink::new(name.as_str(), config),
        });

        Logger {
            name,
            sink,
            categories: Arc::new(categories),
        }
    }
}
