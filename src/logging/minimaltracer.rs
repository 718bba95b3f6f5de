use std::env;
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::field::Visit;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_core::Field;

struct StringVisitor<'a> {
    string: &'a mut String
}

impl<'a> Visit for StringVisitor<'a> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = if field.name() == "message" {
            write!(self.string, "{:?} ", value)
        } else {
            write!(self.string, "{} = {:?}; ", field.name(), value)
        };
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            let _ = write!(self.string, "{} ", value);
        } else {
            let _ = write!(self.string, "{} = {}; ", field.name(), value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>
}

impl LogFilter {
    fn matches(&self, metadata: &Metadata<'_>) -> bool {
        let level_ok = self.level.map_or(true, |level| *metadata.level() <= level);
        let target_ok = self.target.as_ref().map_or(true, |target| metadata.target().starts_with(target.as_str()));
        level_ok && target_ok
    }
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None
    }
}

fn parse_filters(directives: &str) -> Vec<LogFilter> {
    directives.split(',')
        .map(str::trim)
        .filter(|filter| !filter.is_empty())
        .map(|filter| match filter.split_once('=') {
            Some((target, level)) => LogFilter {
                target: Some(target.to_owned()),
                level: string_to_level(level)
            },
            None => match string_to_level(filter) {
                Some(level) => LogFilter { target: None, level: Some(level) },
                None => LogFilter { target: Some(filter.to_owned()), level: None }
            }
        })
        .collect()
}

/// Prints events to stderr, filtered by the `RUST_LOG` directives.
pub struct MinimalTracer {
    enabled: bool,
    filters: Vec<LogFilter>,
    next_span_id: AtomicU64
}

impl MinimalTracer {
    pub fn from_directives(directives: Option<&str>) -> MinimalTracer {
        MinimalTracer {
            enabled: directives.is_some(),
            filters: directives.map(parse_filters).unwrap_or_default(),
            next_span_id: AtomicU64::new(1)
        }
    }

    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let directives = env::var("RUST_LOG").ok();
        tracing::subscriber::set_global_default(MinimalTracer::from_directives(directives.as_deref()))
    }
}

impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.enabled && (self.filters.is_empty() || self.filters.iter().any(|f| f.matches(metadata)))
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(self.next_span_id.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();
        let mut text = String::new();
        event.record(&mut StringVisitor { string: &mut text });
        eprintln!("{} {}: {}", metadata.level(), metadata.target(), text.trim_end());
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
