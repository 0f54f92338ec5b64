use chrono::Local;
use nu_ansi_term::Style;
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
};

use crate::category::Severity;
use crate::config::SinkConfig;
use crate::utils::markup;

pub(crate) const FIELD_MESSAGE: &str = "message";
pub(crate) const FIELD_CALLER_FILE: &str = "caller.file";
pub(crate) const FIELD_CALLER_LINE: &str = "caller.line";
pub(crate) const FIELD_TRACEBACK: &str = "traceback";

const TRACEBACK_INDENT: &str = "    ";

#[derive(Default)]
struct RecordVisitor {
    message: String,
    file: Option<String>,
    line: Option<u64>,
    traceback: Option<String>,
}

impl tracing::field::Visit for RecordVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == FIELD_MESSAGE {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            FIELD_MESSAGE => self.message = value.to_string(),
            FIELD_CALLER_FILE => self.file = Some(value.to_string()),
            FIELD_TRACEBACK => self.traceback = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        if field.name() == FIELD_CALLER_LINE {
            self.line = Some(value);
        }
    }
}

/// Renders one category record:
/// `[time ][LEVEL   ]<label> <message>[  file:line]`, then the traceback
/// indented beneath it.
pub struct CategoryFormatter {
    show_time: bool,
    show_level: bool,
    show_path: bool,
    tracebacks: bool,
    time_format: String,
}

impl CategoryFormatter {
    pub fn new(config: &SinkConfig) -> Self {
        Self {
            show_time: config.show_time,
            show_level: config.show_level,
            show_path: config.show_path,
            tracebacks: config.tracebacks,
            time_format: config.time_format.clone(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for CategoryFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut record = RecordVisitor::default();
        event.record(&mut record);

        let ansi = writer.has_ansi_escapes();
        let dimmed = Style::new().dimmed();
        let metadata = event.metadata();

        if self.show_time {
            let timestamp = Local::now().format(&self.time_format);
            if ansi {
                write!(writer, "{}{}{} ", dimmed.prefix(), timestamp, dimmed.suffix())?;
            } else {
                write!(writer, "{} ", timestamp)?;
            }
        }

        if self.show_level {
            write!(writer, "{:<7} ", Severity::from_level(metadata.level()))?;
        }

        write!(writer, "{}", markup::render(&record.message, ansi))?;

        if self.show_path {
            let file = record.file.as_deref().or(metadata.file());
            let line = record.line.or(metadata.line().map(u64::from));
            if let Some(file) = file {
                let name = Path::new(file)
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_else(|| file.into());
                let location = match line {
                    Some(line) => format!("{}:{}", name, line),
                    None => name.into_owned(),
                };
                if ansi {
                    write!(writer, "  {}", dimmed.paint(location))?;
                } else {
                    write!(writer, "  {}", location)?;
                }
            }
        }
        writeln!(writer)?;

        if self.tracebacks {
            if let Some(traceback) = record.traceback {
                for line in traceback.lines() {
                    writeln!(writer, "{}{}", TRACEBACK_INDENT, line)?;
                }
            }
        }

        Ok(())
    }
}
