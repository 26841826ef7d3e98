//! Remote structured logging
//!
//! Events are `{stack, level, package, message}` records shipped to an
//! external collector. The registry only depends on [`LogSink`]; whether an
//! event is delivered never changes application state.

mod client;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

pub use client::RemoteLogClient;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Wire format of one log event.
///
/// `stack`, `level` and `package` are lower-cased on construction; the
/// message is sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub stack: String,
    pub level: String,
    pub package: String,
    pub message: String,
}

impl LogEvent {
    pub fn new(stack: &str, level: &str, package: &str, message: impl Into<String>) -> Self {
        Self {
            stack: stack.to_lowercase(),
            level: level.to_lowercase(),
            package: package.to_lowercase(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget destination for [`LogEvent`]s.
///
/// Implementations must return promptly and must swallow their own failures.
pub trait LogSink: Send + Sync {
    fn log_event(&self, event: LogEvent);
}

/// Drops every event; used when remote logging is disabled.
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log_event(&self, _event: LogEvent) {}
}

/// Package names used by this crate's events
pub mod packages {
    pub const API: &str = "api";
    pub const STATE: &str = "state";
    pub const UTILS: &str = "utils";
    pub const HANDLER: &str = "handler";
}

/// Binds a sink to a stack name.
///
/// Every event is mirrored into `tracing` at the matching level before it is
/// handed to the sink, so local logs keep the full trail even when the
/// collector is unreachable.
#[derive(Clone)]
pub struct EventLogger {
    sink: Arc<dyn LogSink>,
    stack: String,
}

impl EventLogger {
    pub fn new<S: Into<String>>(sink: Arc<dyn LogSink>, stack: S) -> Self {
        Self {
            sink,
            stack: stack.into(),
        }
    }

    /// Logger that only writes to `tracing`
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink), "backend")
    }

    pub fn log(&self, level: LogLevel, package: &str, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Debug => tracing::debug!(package, "{}", message),
            LogLevel::Info => tracing::info!(package, "{}", message),
            LogLevel::Warn => tracing::warn!(package, "{}", message),
            LogLevel::Error | LogLevel::Fatal => tracing::error!(package, "{}", message),
        }
        self.sink
            .log_event(LogEvent::new(&self.stack, level.as_ref(), package, message));
    }

    pub fn info(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, package, message);
    }

    pub fn warn(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Warn, package, message);
    }

    pub fn error(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, package, message);
    }
}
