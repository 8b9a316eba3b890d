//! Sink trait for finished-record destinations

use super::error::Result;
use super::level::Level;

/// Destination accepting finalized records.
///
/// Hand-off happens concurrently from every thread that finalizes a record,
/// so implementations take `&self` and synchronize internally. Records
/// arrive without a trailing newline; the sink owns framing.
pub trait Sink: Send + Sync {
    /// Accept one finalized record tagged with its severity.
    fn write(&self, level: Level, record: &str) -> Result<()>;

    /// Block until every record already written has been durably processed.
    fn flush(&self) -> Result<()>;

    /// Short name used in failure reports.
    fn name(&self) -> &str;
}
