//! Per-statement record builder.
//!
//! A [`RecordBuilder`] collects one record's free-text body and extra
//! fields, then hands the finished line to its logger when dropped. The
//! reserved prefix fields (timestamp, level, source location, thread id,
//! tracing identifiers) are attached during that final hand-off, so user
//! code never assembles them by hand.

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::marker::PhantomData;
use std::mem;

use chrono::{DateTime, Utc};

use super::context::current_span;
use super::encoding::{escape_char_into, escape_into, EscapeMode, EscapingWriter};
use super::extra::{ExtraValue, LogExtra};
use super::level::Level;
use super::logger::Logger;
use super::timestamp::format_timestamp;
use super::value::LogValue;

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get the cached thread id, computing it on first access.
fn cached_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Builder for a single log record.
///
/// Obtained from [`Logger::record`]. Values appended with [`append`] are
/// rendered into the record's free-text body; key/value pairs added with
/// [`extra`] become their own fields. The record is encoded and written
/// exactly once, when the builder goes out of scope. If the builder is
/// dropped mid-construction (including during unwinding) whatever was
/// appended so far is still written.
///
/// A builder below its logger's threshold is inert: appends are skipped
/// without rendering their arguments and nothing is written on drop.
///
/// Builders are tied to the thread that created them.
///
/// [`append`]: RecordBuilder::append
/// [`extra`]: RecordBuilder::extra
///
/// # Example
///
/// ```
/// use tskv_logger::{Level, Logger};
///
/// let logger = Logger::builder().build()?;
/// logger
///     .record(Level::Info)
///     .append("cache hit ratio ")
///     .append(0.93)
///     .extra("shard", 4u32);
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
pub struct RecordBuilder<'a> {
    logger: &'a Logger,
    level: Level,
    active: bool,
    mode: EscapeMode,
    limit: usize,
    timestamp: DateTime<Utc>,
    location: Option<(&'static str, u32, &'static str)>,
    with_span: bool,
    text: String,
    extra: LogExtra,
    _not_send: PhantomData<*const ()>,
}

impl<'a> RecordBuilder<'a> {
    pub(crate) fn new(logger: &'a Logger, level: Level) -> Self {
        let active = logger.enabled(level);
        Self {
            logger,
            level,
            active,
            mode: EscapeMode::Value,
            limit: logger.message_limit(),
            timestamp: if active {
                Utc::now()
            } else {
                DateTime::<Utc>::MIN_UTC
            },
            location: None,
            with_span: true,
            text: if active {
                String::with_capacity(128)
            } else {
                String::new()
            },
            extra: LogExtra::new(),
            _not_send: PhantomData,
        }
    }

    /// The level this record is being built at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Append a value to the record's free-text body.
    ///
    /// When the builder is inert the value is not rendered at all.
    pub fn append<V: LogValue>(&mut self, value: V) -> &mut Self {
        if self.active {
            value.log_value(self);
        }
        self
    }

    /// Attach an extra field. Appending the same key again replaces the
    /// value while keeping the key's original position.
    pub fn extra<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<ExtraValue>,
    {
        if self.active {
            self.extra.set(key, value);
        }
        self
    }

    /// Merge a whole [`LogExtra`], field by field.
    pub fn extras(&mut self, extra: LogExtra) -> &mut Self {
        if self.active {
            self.extra.extend(extra);
        }
        self
    }

    /// Record the source location to report in the `module` field.
    pub fn location(
        &mut self,
        file: &'static str,
        line: u32,
        module_path: &'static str,
    ) -> &mut Self {
        self.location = Some((file, line, module_path));
        self
    }

    /// Leave the current span's tracing identifiers out of this record.
    pub fn no_span(&mut self) -> &mut Self {
        self.with_span = false;
        self
    }

    /// True once the body has reached the logger's message limit (or the
    /// builder is inert). Writes stop at chunk granularity past this
    /// point, so a single append may overshoot slightly.
    pub fn is_limit_reached(&self) -> bool {
        !self.active || self.text.len() >= self.limit
    }

    /// Append text, escaping reserved characters under the active mode.
    pub fn put(&mut self, src: &str) {
        if self.is_limit_reached() {
            return;
        }
        escape_into(&mut self.text, src, self.mode);
    }

    /// Append a single character, escaped under the active mode.
    pub fn put_char(&mut self, c: char) {
        if self.is_limit_reached() {
            return;
        }
        escape_char_into(&mut self.text, c, self.mode);
    }

    /// Append text known to contain no reserved characters.
    pub fn put_raw(&mut self, src: &str) {
        if self.is_limit_reached() {
            return;
        }
        self.text.push_str(src);
    }

    /// Render format arguments into the body, escaping the output.
    pub fn put_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.is_limit_reached() {
            return;
        }
        let mode = self.mode;
        let mut writer = EscapingWriter::new(&mut self.text, mode, self.limit);
        let _ = writer.write_fmt(args);
    }

    /// Render format arguments whose output is known to need no escaping.
    pub fn put_raw_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.with_escape_mode(EscapeMode::None, |builder| builder.put_fmt(args));
    }

    /// Run `f` with the escape mode swapped. The previous mode is restored
    /// when `f` returns, and also if it unwinds, so a panicking value
    /// cannot leak its mode into the rest of the record.
    pub fn with_escape_mode<R>(
        &mut self,
        mode: EscapeMode,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = mem::replace(&mut self.mode, mode);
        let scope = EscapeScope {
            builder: self,
            previous,
        };
        f(&mut *scope.builder)
    }

    /// Render an iterator as `[e1, e2, ...]`, element by element.
    ///
    /// The message limit is checked before each element. Once reached,
    /// the remaining elements are summarized as `...(K more)` when the
    /// iterator reports an exact remaining count, or `...(more)` when it
    /// cannot, and the bracket is closed. Elements past the cut are never
    /// pulled, so unbounded iterators stay unbounded.
    pub fn put_range<I>(&mut self, range: I)
    where
        I: Iterator,
        I::Item: LogValue,
    {
        if !self.active {
            return;
        }
        let mut iter = range;
        self.text.push('[');
        let mut rendered: usize = 0;
        loop {
            if self.is_limit_reached() {
                let (lower, upper) = iter.size_hint();
                if upper != Some(0) {
                    if rendered > 0 {
                        self.text.push(' ');
                    }
                    if upper == Some(lower) {
                        let _ = write!(self.text, "...({lower} more)");
                    } else {
                        self.text.push_str("...(more)");
                    }
                }
                break;
            }
            match iter.next() {
                Some(item) => {
                    if rendered > 0 {
                        self.text.push_str(", ");
                    }
                    item.log_value(self);
                    rendered += 1;
                }
                None => break,
            }
        }
        self.text.push(']');
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &str {
        &self.text
    }

    /// Assemble the full record and hand it to the logger. Reserved
    /// fields come first, extras in insertion order, and the free-text
    /// body closes the line as the `text` field.
    fn finalize(&mut self) {
        let mut record = String::with_capacity(self.text.len() + 96);
        record.push_str("timestamp=");
        record.push_str(&format_timestamp(&self.timestamp));
        record.push_str("\tlevel=");
        record.push_str(self.level.as_str());
        if let Some((file, line, module_path)) = self.location {
            record.push_str("\tmodule=");
            escape_into(&mut record, module_path, EscapeMode::Value);
            record.push_str(" ( ");
            escape_into(&mut record, file, EscapeMode::Value);
            let _ = write!(record, ":{line}");
            record.push_str(" )");
        }
        record.push_str("\tthread_id=");
        record.push_str(&cached_thread_id());
        if self.with_span {
            if let Some(span) = current_span() {
                record.push_str("\ttrace_id=");
                escape_into(&mut record, &span.trace_id, EscapeMode::Value);
                record.push_str("\tspan_id=");
                escape_into(&mut record, &span.span_id, EscapeMode::Value);
            }
        }
        for (key, value) in self.extra.iter() {
            record.push('\t');
            escape_into(&mut record, key, EscapeMode::Key);
            record.push('=');
            value.encode_into(&mut record);
        }
        record.push_str("\ttext=");
        record.push_str(&self.text);

        self.logger.dispatch(self.level, &record);
    }
}

impl Drop for RecordBuilder<'_> {
    fn drop(&mut self) {
        if self.active {
            self.finalize();
        }
    }
}

struct EscapeScope<'s, 'a> {
    builder: &'s mut RecordBuilder<'a>,
    previous: EscapeMode,
}

impl Drop for EscapeScope<'_, '_> {
    fn drop(&mut self) {
        self.builder.mode = self.previous;
    }
}
