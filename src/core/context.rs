//! Thread-scoped tracing context
//!
//! The builder merges the innermost active context's identifiers into each
//! record at finalize. This module only stores and hands back identifiers;
//! propagation and sampling belong to the tracing subsystem.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::marker::PhantomData;

/// Identifiers attached to records produced while a span is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingContext {
    pub trace_id: String,
    pub span_id: String,
}

impl TracingContext {
    #[must_use]
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
        }
    }
}

thread_local! {
    static SPAN_STACK: RefCell<Vec<TracingContext>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard that makes a [`TracingContext`] current for the calling thread.
///
/// Guards nest; dropping restores the previously active context.
///
/// # Example
///
/// ```
/// use tskv_logger::{SpanGuard, TracingContext};
///
/// let _span = SpanGuard::enter(TracingContext::new("trace-1", "span-a"));
/// // records built on this thread now carry trace_id/span_id fields
/// ```
pub struct SpanGuard {
    // Tied to the installing thread's stack slot.
    _not_send: PhantomData<*const ()>,
}

impl SpanGuard {
    pub fn enter(context: TracingContext) -> Self {
        SPAN_STACK.with(|stack| stack.borrow_mut().push(context));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        SPAN_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Innermost active context of the calling thread, if any.
pub(crate) fn current_span() -> Option<TracingContext> {
    SPAN_STACK.with(|stack| stack.borrow().last().cloned())
}
