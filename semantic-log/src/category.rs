//! # Semantic Categories
//!
//! The category table maps a category name (`read`, `metric`, `error`, ...)
//! to the label, color and severity its records are emitted with.
//!
//! The builtin entries are declared once in [`semantic_categories!`], which
//! expands into both the builtin table and one method per entry on
//! [`Logger`](crate::Logger). Categories added at runtime go through
//! [`CategoryTable::with_category`] and are reached with
//! [`Logger::log_as`](crate::Logger::log_as).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Ordered log level: `Trace < Debug < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl Severity {
    pub const fn as_level(self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }

    pub fn from_level(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => Severity::Trace,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(LogError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

/// Foreground color of a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl LabelColor {
    pub const ALL: [LabelColor; 8] = [
        LabelColor::Black,
        LabelColor::Red,
        LabelColor::Green,
        LabelColor::Yellow,
        LabelColor::Blue,
        LabelColor::Magenta,
        LabelColor::Cyan,
        LabelColor::White,
    ];

    /// Name used in markup tags, e.g. `[magenta]`.
    pub const fn name(self) -> &'static str {
        match self {
            LabelColor::Black => "black",
            LabelColor::Red => "red",
            LabelColor::Green => "green",
            LabelColor::Yellow => "yellow",
            LabelColor::Blue => "blue",
            LabelColor::Magenta => "magenta",
            LabelColor::Cyan => "cyan",
            LabelColor::White => "white",
        }
    }

    pub const fn as_ansi(self) -> Color {
        match self {
            LabelColor::Black => Color::Black,
            LabelColor::Red => Color::Red,
            LabelColor::Green => Color::Green,
            LabelColor::Yellow => Color::Yellow,
            LabelColor::Blue => Color::Blue,
            LabelColor::Magenta => Color::Magenta,
            LabelColor::Cyan => Color::Cyan,
            LabelColor::White => Color::White,
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LabelColor {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LabelColor::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LogError::InvalidColor {
                value: s.to_string(),
            })
    }
}

/// Label, color and severity of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub label: Cow<'static, str>,
    pub color: LabelColor,
    pub severity: Severity,
}

impl CategoryDescriptor {
    pub const fn new(label: &'static str, color: LabelColor, severity: Severity) -> Self {
        Self {
            label: Cow::Borrowed(label),
            color,
            severity,
        }
    }

    pub fn owned(label: impl Into<String>, color: LabelColor, severity: Severity) -> Self {
        Self {
            label: Cow::Owned(label.into()),
            color,
            severity,
        }
    }
}

/// One entry of a JSON category list.
#[derive(Debug, Clone, Deserialize)]
struct CategorySpec {
    name: String,
    label: String,
    color: LabelColor,
    severity: Severity,
}

/// Ordered name → descriptor mapping.
///
/// Always contains the builtin categories; entries can be added or replaced
/// but not removed, so every builtin method on `Logger` resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<(Cow<'static, str>, CategoryDescriptor)>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CATEGORIES
                .iter()
                .map(|(name, descriptor)| (Cow::Borrowed(*name), descriptor.clone()))
                .collect(),
        }
    }

    /// Builtin table extended with the categories in a JSON array of
    /// `{"name", "label", "color", "severity"}` objects.
    pub fn from_json(json: &str) -> Result<Self, LogError> {
        Self::builtin().extend_from_json(json)
    }

    pub fn extend_from_json(mut self, json: &str) -> Result<Self, LogError> {
        let specs: Vec<CategorySpec> =
            serde_json::from_str(json).map_err(LogError::InvalidCategories)?;
        for spec in specs {
            self.insert(
                spec.name,
                CategoryDescriptor::owned(spec.label, spec.color, spec.severity),
            );
        }
        Ok(self)
    }

    /// Adds `name`, or replaces its descriptor in place if already present.
    pub fn with_category(mut self, name: impl Into<String>, descriptor: CategoryDescriptor) -> Self {
        self.insert(name.into(), descriptor);
        self
    }

    fn insert(&mut self, name: String, descriptor: CategoryDescriptor) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.entries.push((Cow::Owned(name), descriptor)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CategoryDescriptor> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    pub fn resolve(&self, name: &str) -> Result<&CategoryDescriptor, LogError> {
        self.get(name)
            .ok_or_else(|| LogError::unknown_category(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryDescriptor)> {
        self.entries
            .iter()
            .map(|(name, descriptor)| (name.as_ref(), descriptor))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declares the builtin categories.
///
/// Each `name => "LABEL", Color, Severity;` line becomes an entry of
/// `BUILTIN_CATEGORIES` and a `Logger::name(message)` method. The method
/// looks its descriptor up in the logger's own table so overrides apply.
macro_rules! semantic_categories {
    ($( $(#[$meta:meta])* $name:ident => $label:literal, $color:ident, $severity:ident; )*) => {
        /// Builtin categories in declaration order.
        pub const BUILTIN_CATEGORIES: &[(&str, CategoryDescriptor)] = &[
            $( (stringify!($name), CategoryDescriptor::new($label, LabelColor::$color, Severity::$severity)), )*
        ];

        impl crate::logger::Logger {
            $(
                $(#[$meta])*
                #[track_caller]
                pub fn $name(&self, message: impl fmt::Display) {
                    const BUILTIN: CategoryDescriptor =
                        CategoryDescriptor::new($label, LabelColor::$color, Severity::$severity);
                    let fallback = BUILTIN;
                    let descriptor = self
                        .categories()
                        .get(stringify!($name))
                        .unwrap_or(&fallback);
                    self.emit_descriptor(descriptor, &message);
                }
            )*
        }
    };
}

semantic_categories! {
    // I/O
    /// Data being loaded.
    read => "READ", Magenta, Info;
    /// Data being saved.
    write => "WRITE", Magenta, Info;
    /// Facts about inputs or outputs.
    meta => "METADATA", Magenta, Info;

    // Processing checkpoints
    /// Start of a major phase.
    stage => "STAGE", Blue, Info;
    step => "STEP", Blue, Info;
    substep => "SUB", Blue, Info;
    /// General status line.
    info => "STATUS", Blue, Info;

    // Figures
    config => "CONFIG", Cyan, Info;
    metric => "METRIC", Cyan, Info;
    result => "RESULT", Cyan, Info;

    // Problems
    warning => "WARNING", Yellow, Warning;
    alert => "ALERT", Red, Error;
    error => "ERROR", Red, Error;

    // Development
    check => "CHECK", Green, Debug;
    /// Developer detail. Carries the active error's traceback, if any.
    debug => "DEBUG", Green, Debug;
}
