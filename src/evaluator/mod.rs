//! Phase-state evaluation: one query in, one [`Report`] out.
//!
//! Both calling conventions implement [`EvaluateQuery`]. They differ in
//! the units REFPROP expects and in how the active refrigerant is
//! communicated, never in what the caller gets back: every report is in
//! °F, psig and English mass units.

mod legacy;
mod modern;

pub use legacy::LegacyEvaluator;
pub use modern::ModernEvaluator;

use crate::config::Convention;
use crate::error::Result;
use crate::properties::Report;
use crate::query::StateQuery;

/// A retrieval strategy selected by configuration.
///
/// `evaluate` validates the query before touching the engine; a query
/// with no refrigerant, or with neither temperature nor pressure, fails
/// with `InvalidInput` and makes no engine call. Engine errors are
/// returned unchanged and no partial report is produced.
pub trait EvaluateQuery {
    fn evaluate(&mut self, query: &StateQuery) -> Result<Report>;

    fn convention(&self) -> Convention;
}
