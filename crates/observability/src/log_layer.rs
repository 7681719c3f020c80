//! Layer that forwards each event as one formatted line to a [LogSink].

use std::fmt::Write;

use tracing::field::Visit;
use tracing_subscriber::layer::{Context, Layer};

use crate::config::LogSink;

const MAX_LINE_LEN: usize = 4_000;

/// Collects "message key=value ..." for one event.
#[derive(Default)]
struct LineVisitor {
    buf: String,
}

impl LineVisitor {
    fn push_sep(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push_sep();
        if field.name() == "message" {
            self.buf.push_str(value);
        } else {
            write!(self.buf, "{}={:?}", field.name(), value).ok();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push_sep();
        if field.name() == "message" {
            write!(self.buf, "{:?}", value).ok();
        } else {
            write!(self.buf, "{}={:?}", field.name(), value).ok();
        }
    }
}

/// Format an event line: `[LEVEL] target: message key=value`.
pub fn format_line(level: &tracing::Level, target: &str, rest: &str) -> String {
    let line = if rest.is_empty() {
        format!("[{}] {}", level, target)
    } else {
        format!("[{}] {}: {}", level, target, rest)
    };
    let count = line.chars().count();
    if count > MAX_LINE_LEN {
        let trunc: String = line.chars().take(MAX_LINE_LEN).collect();
        format!("{}… ({} chars)", trunc, count)
    } else {
        line
    }
}

pub(crate) fn log_sink_layer(sink: Option<LogSink>) -> LogSinkLayer {
    LogSinkLayer { sink }
}

#[derive(Clone)]
pub(crate) struct LogSinkLayer {
    sink: Option<LogSink>,
}

impl<S> Layer<S> for LogSinkLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(sink) = &self.sink else {
            return;
        };
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        sink(format_line(meta.level(), meta.target(), &visitor.buf));
    }
}
