//! Value dispatch: how appended values become record text
//!
//! Every type that can be appended to a [`RecordBuilder`] implements
//! [`LogValue`]. The impl set below mirrors a fixed precedence of value
//! categories: single characters, string-like values, floating-point,
//! signed integers, unsigned integers and booleans (`0`/`1`), error-like
//! values, `Display`-delegated output, and sequences. Anything outside
//! these categories fails to compile rather than stringifying silently;
//! wrap such values in [`AsDisplay`] or [`AsDebug`], or implement
//! [`LogValue`] for them.
//!
//! Character, string and error renderings are escaped under the builder's
//! current mode. Numeric, boolean and hex renderings bypass escaping; their
//! alphabet cannot collide with the reserved characters.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

use super::level::Level;
use super::record::RecordBuilder;

/// A value that can be appended to a log record.
///
/// Implementations write themselves into the builder through its `put_*`
/// surface and must not panic.
#[diagnostic::on_unimplemented(
    message = "no rendering rule for `{Self}` in log records",
    label = "cannot be appended to a log record",
    note = "implement `LogValue` for it, or wrap it in `AsDisplay`/`AsDebug` to log its `Display`/`Debug` output"
)]
pub trait LogValue {
    fn log_value(&self, builder: &mut RecordBuilder<'_>);
}

impl<T: LogValue + ?Sized> LogValue for &T {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        (**self).log_value(builder);
    }
}

// Characters and string-like values, escaped under the active mode.

impl LogValue for char {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_char(*self);
    }
}

impl LogValue for str {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put(self);
    }
}

impl LogValue for String {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put(self);
    }
}

impl LogValue for Cow<'_, str> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put(self.as_ref());
    }
}

impl LogValue for Box<str> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put(self);
    }
}

impl LogValue for CStr {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put(&self.to_string_lossy());
    }
}

impl LogValue for CString {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        self.as_c_str().log_value(builder);
    }
}

// Floating-point: Rust's Display already emits the shortest text that
// round-trips, and it never contains reserved characters.

macro_rules! impl_log_value_raw_display {
    ($($ty:ty),+) => {
        $(
            impl LogValue for $ty {
                fn log_value(&self, builder: &mut RecordBuilder<'_>) {
                    builder.put_raw_fmt(format_args!("{}", self));
                }
            }
        )+
    };
}

impl_log_value_raw_display!(f32, f64);
impl_log_value_raw_display!(i8, i16, i32, i64, i128, isize);
impl_log_value_raw_display!(u8, u16, u32, u64, u128, usize);

impl LogValue for bool {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_raw(if *self { "1" } else { "0" });
    }
}

// Atomics render their loaded value.

macro_rules! impl_log_value_atomic {
    ($($atomic:ty),+) => {
        $(
            impl LogValue for $atomic {
                fn log_value(&self, builder: &mut RecordBuilder<'_>) {
                    self.load(Ordering::Relaxed).log_value(builder);
                }
            }
        )+
    };
}

impl_log_value_atomic!(
    AtomicBool,
    AtomicI8,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicIsize,
    AtomicU8,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicUsize
);

// Error-like values render their message; escaping keeps a multi-line
// message inside one record.

impl LogValue for dyn std::error::Error + '_ {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self));
    }
}

impl LogValue for Box<dyn std::error::Error + '_> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self));
    }
}

impl LogValue for Box<dyn std::error::Error + Send + Sync + '_> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self));
    }
}

impl LogValue for std::io::Error {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self));
    }
}

impl LogValue for std::io::ErrorKind {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self));
    }
}

// Display-delegated output (what the statement macros produce).

impl LogValue for fmt::Arguments<'_> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(*self);
    }
}

impl LogValue for Level {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_raw(self.as_str());
    }
}

/// Logs any `Display` value through its `Display` impl.
///
/// # Example
///
/// ```
/// use tskv_logger::{AsDisplay, Level, Logger};
/// use std::net::Ipv4Addr;
///
/// let logger = Logger::builder().build()?;
/// logger
///     .record(Level::Info)
///     .append("peer ")
///     .append(AsDisplay(Ipv4Addr::LOCALHOST));
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
pub struct AsDisplay<T>(pub T);

impl<T: fmt::Display> LogValue for AsDisplay<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{}", self.0));
    }
}

/// Logs any `Debug` value through its `Debug` impl.
pub struct AsDebug<T>(pub T);

impl<T: fmt::Debug> LogValue for AsDebug<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_fmt(format_args!("{:?}", self.0));
    }
}

// Optional-shaped and paired values.

impl<T: LogValue> LogValue for Option<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        match self {
            Some(value) => value.log_value(builder),
            None => builder.put_raw("(none)"),
        }
    }
}

impl<A: LogValue, B: LogValue> LogValue for (A, B) {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        self.0.log_value(builder);
        builder.put_raw(": ");
        self.1.log_value(builder);
    }
}

// Raw pointers are never dereferenced: null renders as a literal and
// everything else as its address. Use `&CStr`/`CString` for C strings.

impl<T: ?Sized> LogValue for *const T {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        let thin = self.cast::<()>();
        if thin.is_null() {
            builder.put_raw("(null)");
        } else {
            Hex::from_ptr(thin).log_value(builder);
        }
    }
}

impl<T: ?Sized> LogValue for *mut T {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        self.cast_const().log_value(builder);
    }
}

// Sequences, rendered under the truncation-aware range policy.

impl<T: LogValue> LogValue for [T] {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<T: LogValue, const N: usize> LogValue for [T; N] {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<T: LogValue> LogValue for Vec<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<T: LogValue> LogValue for VecDeque<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<T: LogValue> LogValue for BTreeSet<T> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<T: LogValue, S> LogValue for HashSet<T, S> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<K: LogValue, V: LogValue> LogValue for BTreeMap<K, V> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

impl<K: LogValue, V: LogValue, S> LogValue for HashMap<K, V, S> {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.iter());
    }
}

/// Adapter that renders an arbitrary iterator under the range policy
/// without materializing it.
///
/// The iterator source is cloned per append, so unbounded sources stay
/// lazy; the remaining-element count falls back to `...(more)` when the
/// source cannot report an exact size.
///
/// # Example
///
/// ```
/// use tskv_logger::{Level, Logger, Sequence};
///
/// let logger = Logger::builder().build()?;
/// logger
///     .record(Level::Debug)
///     .append("squares ")
///     .append(Sequence((1u64..).map(|x| x * x)));
/// # Ok::<(), tskv_logger::LogError>(())
/// ```
pub struct Sequence<I>(pub I);

impl<I> LogValue for Sequence<I>
where
    I: IntoIterator + Clone,
    I::Item: LogValue,
{
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_range(self.0.clone().into_iter());
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for u128 {}
    impl Sealed for usize {}
}

/// Unsigned sources accepted by [`Hex`] and [`HexShort`].
pub trait HexValue: sealed::Sealed + Copy {
    #[doc(hidden)]
    fn widen(self) -> u128;
}

macro_rules! impl_hex_value {
    ($($ty:ty),+) => {
        $(
            impl HexValue for $ty {
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )+
    };
}

impl_hex_value!(u8, u16, u32, u64, u128, usize);

/// Fixed-width lowercase hexadecimal rendering.
///
/// Width is twice the byte width of the source type, zero-padded on the
/// left, so `Hex::new(255u32)` renders as `000000ff`.
///
/// # Example
///
/// ```
/// use tskv_logger::Hex;
///
/// assert_eq!(Hex::new(255u32).to_string(), "000000ff");
/// assert_eq!(Hex::new(255u16).to_string(), "00ff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hex {
    value: u128,
    digits: usize,
}

impl Hex {
    #[must_use]
    pub fn new<T: HexValue>(value: T) -> Self {
        Self {
            value: value.widen(),
            digits: std::mem::size_of::<T>() * 2,
        }
    }

    pub(crate) fn from_ptr(ptr: *const ()) -> Self {
        Self::new(ptr as usize)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0digits$x}", self.value, digits = self.digits)
    }
}

impl LogValue for Hex {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_raw_fmt(format_args!("{}", self));
    }
}

/// Shortest lowercase hexadecimal rendering, minimum one digit.
///
/// # Example
///
/// ```
/// use tskv_logger::HexShort;
///
/// assert_eq!(HexShort::new(255u32).to_string(), "ff");
/// assert_eq!(HexShort::new(0u64).to_string(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexShort {
    value: u128,
}

impl HexShort {
    #[must_use]
    pub fn new<T: HexValue>(value: T) -> Self {
        Self {
            value: value.widen(),
        }
    }
}

impl fmt::Display for HexShort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.value)
    }
}

impl LogValue for HexShort {
    fn log_value(&self, builder: &mut RecordBuilder<'_>) {
        builder.put_raw_fmt(format_args!("{}", self));
    }
}
