//! Folio Content Library
//!
//! Loads content records from the content store and hands them out in the
//! orders the pages display them.
//!
//! # Modules
//!
//! - [`collector`] - Directory walking, parsing and parallel validation
//! - [`collections`] - Validated collections and their display orderings

pub mod collections;
pub mod collector;

pub use collections::{Collections, Entry};
pub use collector::{CollectStats, CollectorError, ContentCollector, Problem, RecordFailure};
