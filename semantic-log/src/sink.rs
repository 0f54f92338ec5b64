//! # Sinks
//!
//! A [`Sink`] is a private `tracing` dispatcher with a single fmt layer that
//! renders category records. Records go only to the sink's own dispatcher,
//! never to the process-wide `tracing` subscriber, so each one is written
//! exactly once.
//!
//! [`SinkRegistry`] maps stream names to sinks. The first construction of a
//! name creates its sink; later ones reuse it.

use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{warn, Dispatch, Level};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::prelude::*;

use crate::category::Severity;
use crate::config::{SinkConfig, SinkTarget, DEFAULT_TIME_FORMAT};
use crate::utils::CategoryFormatter;

/// Target of every record emitted through a sink.
pub const RECORD_TARGET: &str = "semantic_log";

pub struct Sink {
    name: String,
    config: SinkConfig,
    dispatch: Dispatch,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Sink {
    /// Sink writing to the configured console stream.
    pub fn new(name: impl Into<String>, config: SinkConfig) -> Self {
        let writer = match config.target {
            SinkTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
            SinkTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        };
        Self::build(name.into(), config, writer)
    }

    pub fn with_writer<W>(name: impl Into<String>, config: SinkConfig, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(name.into(), config, BoxMakeWriter::new(writer))
    }

    fn build(name: String, mut config: SinkConfig, writer: BoxMakeWriter) -> Self {
        if let Err(err) = config.validate() {
            warn!(stream = %name, "{}; using {}", err, DEFAULT_TIME_FORMAT);
            config.time_format = DEFAULT_TIME_FORMAT.to_string();
        }

        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(config.markup)
            .event_format(CategoryFormatter::new(&config))
            .with_writer(writer);
        let dispatch = Dispatch::new(tracing_subscriber::registry().with(layer));

        Self {
            name,
            config,
            dispatch,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Writes one record. `text` already carries the label markup.
    pub(crate) fn emit(
        &self,
        severity: Severity,
        text: &str,
        caller: &Location<'_>,
        traceback: Option<&str>,
    ) {
        let stream = self.name.as_str();
        let file = caller.file();
        let line = caller.line();

        tracing::dispatcher::with_default(&self.dispatch, || {
            macro_rules! record {
                ($level:expr) => {
                    tracing::event!(
                        target: RECORD_TARGET,
                        $level,
                        stream = stream,
                        caller.file = file,
                        caller.line = line,
                        traceback = traceback,
                        "{}",
                        text
                    )
                };
            }

            match severity {
                Severity::Trace => record!(Level::TRACE),
                Severity::Debug => record!(Level::DEBUG),
                Severity::Info => record!(Level::INFO),
                Severity::Warning => record!(Level::WARN),
                Severity::Error => record!(Level::ERROR),
            }
        });
    }
}

/// Process-scoped mapping from stream name to sink.
#[derive(Debug, Default)]
pub struct SinkRegistry {
    sinks: Mutex<HashMap<String, Arc<Sink>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> Arc<SinkRegistry> {
        static INSTANCE: OnceLock<Arc<SinkRegistry>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(SinkRegistry::new())).clone()
    }

    /// Returns the sink registered under `name`, calling `create` only if
    /// there is none yet. Creation happens under the registry lock, so two
    /// racing constructions of one name end up with the same sink.
    pub fn get_or_create<F>(&self, name: &str, create: F) -> Arc<Sink>
    where
        F: FnOnce() -> Sink,
    {
        let mut sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        sinks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(create()))
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Sink>> {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
